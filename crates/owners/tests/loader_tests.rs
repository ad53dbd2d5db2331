//! Integration tests for the GitHub-backed ownership loader.

use std::sync::Arc;

use base64::Engine;
use github::GitHubClient;
use owners::{GitHubOwnersLoader, LabelResolver, OwnersError, OwnersLoader};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn loader_for(server: &MockServer) -> GitHubOwnersLoader {
    let client = GitHubClient::with_base_url(server.uri(), None).expect("client should build");
    GitHubOwnersLoader::new(Arc::new(client))
}

fn content_body(text: &str) -> serde_json::Value {
    json!({
        "content": base64::engine::general_purpose::STANDARD.encode(text),
        "encoding": "base64"
    })
}

async fn mount_tree(server: &MockServer, entries: &[(&str, &str)]) {
    let tree: Vec<_> = entries
        .iter()
        .map(|(p, kind)| json!({ "path": p, "type": kind }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/git/trees/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tree": tree,
            "truncated": false
        })))
        .mount(server)
        .await;
}

async fn mount_content(server: &MockServer, file_path: &str, text: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/acme/widgets/contents/{file_path}")))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(content_body(text)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn loads_and_aggregates_owners_files() {
    let server = MockServer::start().await;

    mount_tree(
        &server,
        &[
            ("OWNERS", "blob"),
            ("docs", "tree"),
            ("docs/OWNERS", "blob"),
            ("docs/readme.md", "blob"),
            ("pkg/util/set.go", "blob"),
        ],
    )
    .await;
    mount_content(&server, "OWNERS", "labels:\n  - team/core\n").await;
    mount_content(
        &server,
        "docs/OWNERS",
        "approvers:\n  - alice\nlabels:\n  - area/docs\n",
    )
    .await;

    let owners = loader_for(&server)
        .load_repo_owners("acme", "widgets", "main")
        .await
        .expect("snapshot should load");

    assert_eq!(owners.rule_count(), 2);

    let doc_labels = owners.find_labels_for_file("docs/readme.md");
    assert!(doc_labels.contains("area/docs"));
    assert!(doc_labels.contains("team/core"));

    let code_labels = owners.find_labels_for_file("pkg/util/set.go");
    assert!(code_labels.contains("team/core"));
    assert!(!code_labels.contains("area/docs"));
}

#[tokio::test]
async fn tolerates_owners_file_without_labels() {
    let server = MockServer::start().await;

    mount_tree(&server, &[("OWNERS", "blob"), ("docs/OWNERS", "blob")]).await;
    mount_content(&server, "OWNERS", "approvers:\n  - alice\n").await;
    mount_content(&server, "docs/OWNERS", "labels:\n  - area/docs\n").await;

    let owners = loader_for(&server)
        .load_repo_owners("acme", "widgets", "main")
        .await
        .expect("snapshot should load");

    // Only docs/ declared labels.
    assert_eq!(owners.rule_count(), 1);
    assert!(owners.find_labels_for_file("main.go").is_empty());
}

#[tokio::test]
async fn tree_listing_failure_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/git/trees/main"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = loader_for(&server)
        .load_repo_owners("acme", "widgets", "main")
        .await
        .expect_err("load should fail");

    assert!(matches!(err, OwnersError::TreeListing { .. }));
}

#[tokio::test]
async fn owners_fetch_failure_is_fatal() {
    let server = MockServer::start().await;

    mount_tree(&server, &[("OWNERS", "blob")]).await;
    // No content mock mounted: the fetch 404s.

    let err = loader_for(&server)
        .load_repo_owners("acme", "widgets", "main")
        .await
        .expect_err("load should fail");

    match err {
        OwnersError::FileFetch { path, .. } => assert_eq!(path, "OWNERS"),
        other => panic!("unexpected error: {other:?}"),
    }
}
