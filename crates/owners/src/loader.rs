//! Loading ownership snapshots from a repository.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use github::{GitHubClient, GitHubError};

use crate::snapshot::RepoOwners;

/// Name of the per-directory ownership file.
pub const OWNERS_FILE: &str = "OWNERS";

/// Errors that can occur while loading an ownership snapshot.
///
/// Any of these aborts the reconciliation that requested the load.
#[derive(Debug, Error)]
pub enum OwnersError {
    /// Listing the repository tree failed
    #[error("failed to list repository tree at {reference}: {source}")]
    TreeListing {
        reference: String,
        #[source]
        source: GitHubError,
    },

    /// Fetching one ownership file failed
    #[error("failed to fetch {path}: {source}")]
    FileFetch {
        path: String,
        #[source]
        source: GitHubError,
    },
}

/// Loads a repository's ownership snapshot at a base ref.
#[async_trait]
pub trait OwnersLoader: Send + Sync {
    /// Build the snapshot for `org/repo` at `base_ref`.
    async fn load_repo_owners(
        &self,
        org: &str,
        repo: &str,
        base_ref: &str,
    ) -> Result<RepoOwners, OwnersError>;
}

/// The `labels` section of an ownership file. Other sections (approvers,
/// reviewers, options) are irrelevant here and ignored.
#[derive(Debug, Default, Deserialize)]
struct OwnersFile {
    #[serde(default)]
    labels: Vec<String>,
}

/// [`OwnersLoader`] backed by the GitHub contents and trees APIs.
pub struct GitHubOwnersLoader {
    client: Arc<GitHubClient>,
}

impl GitHubOwnersLoader {
    #[must_use]
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OwnersLoader for GitHubOwnersLoader {
    async fn load_repo_owners(
        &self,
        org: &str,
        repo: &str,
        base_ref: &str,
    ) -> Result<RepoOwners, OwnersError> {
        let paths = self
            .client
            .tree_paths(org, repo, base_ref)
            .await
            .map_err(|source| OwnersError::TreeListing {
                reference: base_ref.to_string(),
                source,
            })?;

        let mut owners = RepoOwners::default();

        for path in paths.iter().filter(|p| is_owners_path(p)) {
            let bytes = self
                .client
                .file_content(org, repo, path, base_ref)
                .await
                .map_err(|source| OwnersError::FileFetch {
                    path: path.clone(),
                    source,
                })?;

            // A malformed file contributes nothing but does not fail the
            // load; the reconciliation can still act on the rest.
            let labels = match parse_owners_labels(&bytes) {
                Ok(labels) => labels,
                Err(e) => {
                    warn!(path = %path, error = %e, "Skipping unparseable ownership file");
                    continue;
                }
            };

            if labels.is_empty() {
                continue;
            }

            let dir = path.strip_suffix(OWNERS_FILE).map_or("", |d| d.trim_end_matches('/'));
            owners.insert_dir(dir, labels);
        }

        debug!(
            org = %org,
            repo = %repo,
            base_ref = %base_ref,
            rules = owners.rule_count(),
            "Loaded ownership snapshot"
        );

        Ok(owners)
    }
}

fn is_owners_path(path: &str) -> bool {
    path == OWNERS_FILE || path.ends_with("/OWNERS")
}

fn parse_owners_labels(bytes: &[u8]) -> Result<BTreeSet<String>, serde_yaml::Error> {
    let file: OwnersFile = serde_yaml::from_slice(bytes)?;
    Ok(file.labels.into_iter().collect())
}
