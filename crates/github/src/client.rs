//! The GitHub REST client.

use base64::Engine;
use reqwest::{header, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::GitHubError;
use crate::models::{Label, PullRequestChange};

/// Default API host.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;

/// Async client for the slice of the GitHub v3 API the labeler uses.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client against the public GitHub API.
    pub fn new(token: Option<String>) -> Result<Self, GitHubError> {
        Self::with_base_url(GITHUB_API_URL, token)
    }

    /// Create a client against a specific API host (GitHub Enterprise,
    /// or a mock server in tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder()
            .user_agent("labelbot")
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Changed files for a pull request, across all pages.
    pub async fn pull_request_changes(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PullRequestChange>, GitHubError> {
        self.get_paginated(&format!("/repos/{org}/{repo}/pulls/{number}/files"))
            .await
    }

    /// The repository's declared label vocabulary, across all pages.
    pub async fn repo_labels(&self, org: &str, repo: &str) -> Result<Vec<Label>, GitHubError> {
        self.get_paginated(&format!("/repos/{org}/{repo}/labels")).await
    }

    /// Labels currently applied to an issue or pull request.
    pub async fn issue_labels(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<Label>, GitHubError> {
        self.get_paginated(&format!("/repos/{org}/{repo}/issues/{number}/labels"))
            .await
    }

    /// Add a single label to an issue or pull request.
    ///
    /// GitHub treats adding an already-present label as a success, so this
    /// call is safe to repeat.
    pub async fn add_label(
        &self,
        org: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> Result<(), GitHubError> {
        let url = format!("{}/repos/{org}/{repo}/issues/{number}/labels", self.base_url);

        debug!(org = %org, repo = %repo, number = number, label = %label, "Adding label");

        let response = self
            .request(Method::POST, &url)
            .json(&serde_json::json!({ "labels": [label] }))
            .send()
            .await?;
        Self::check_status(response).await?;

        Ok(())
    }

    /// Raw contents of a file at a specific ref.
    ///
    /// The contents API wraps base64 payloads in newlines, so whitespace is
    /// stripped before decoding.
    pub async fn file_content(
        &self,
        org: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Vec<u8>, GitHubError> {
        let url = format!(
            "{}/repos/{org}/{repo}/contents/{path}?ref={}",
            self.base_url,
            urlencoding::encode(reference)
        );

        let file: ContentFile = self.get_json(&url).await?;
        let encoded = file
            .content
            .ok_or_else(|| GitHubError::Decode(format!("no content returned for {path}")))?;
        let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

        base64::engine::general_purpose::STANDARD
            .decode(&compact)
            .map_err(|e| GitHubError::Decode(format!("invalid base64 for {path}: {e}")))
    }

    /// All blob paths in the repository tree at a specific ref.
    pub async fn tree_paths(
        &self,
        org: &str,
        repo: &str,
        reference: &str,
    ) -> Result<Vec<String>, GitHubError> {
        let url = format!(
            "{}/repos/{org}/{repo}/git/trees/{}?recursive=1",
            self.base_url,
            urlencoding::encode(reference)
        );

        let tree: TreeResponse = self.get_json(&url).await?;
        if tree.truncated {
            return Err(GitHubError::TruncatedTree {
                reference: reference.to_string(),
            });
        }

        Ok(tree
            .tree
            .into_iter()
            .filter(|entry| entry.kind == "blob")
            .map(|entry| entry.path)
            .collect())
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/vnd.github.v3+json");

        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GitHubError> {
        let response = self.request(Method::GET, url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, GitHubError> {
        let mut out = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!("{}{path}?per_page={PER_PAGE}&page={page}", self.base_url);
            let batch: Vec<T> = self.get_json(&url).await?;
            let batch_len = batch.len();
            out.extend(batch);

            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(out)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(GitHubError::Status { status, url, body })
    }
}

/// Contents API response (only the fields we read).
#[derive(Debug, Deserialize)]
struct ContentFile {
    /// Base64-encoded content
    content: Option<String>,
}

/// Git trees API response.
#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}
