//! The tracker capability interface injected into the reconciler.
//!
//! The reconciler never talks to a concrete API client; it sees this trait,
//! which keeps the pipeline testable and the transport swappable.

use anyhow::Result;
use async_trait::async_trait;

use github::{GitHubClient, Label, PullRequestChange};

/// The four tracker operations label reconciliation needs.
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Changed files for a pull request.
    async fn pull_request_changes(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PullRequestChange>>;

    /// The repository's declared label vocabulary.
    async fn repo_labels(&self, org: &str, repo: &str) -> Result<Vec<Label>>;

    /// Labels currently applied to the pull request.
    async fn issue_labels(&self, org: &str, repo: &str, number: u64) -> Result<Vec<Label>>;

    /// Add a single label to the pull request. Adding an already-present
    /// label is a success.
    async fn add_label(&self, org: &str, repo: &str, number: u64, label: &str) -> Result<()>;
}

#[async_trait]
impl TrackerClient for GitHubClient {
    async fn pull_request_changes(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PullRequestChange>> {
        Ok(Self::pull_request_changes(self, org, repo, number).await?)
    }

    async fn repo_labels(&self, org: &str, repo: &str) -> Result<Vec<Label>> {
        Ok(Self::repo_labels(self, org, repo).await?)
    }

    async fn issue_labels(&self, org: &str, repo: &str, number: u64) -> Result<Vec<Label>> {
        Ok(Self::issue_labels(self, org, repo, number).await?)
    }

    async fn add_label(&self, org: &str, repo: &str, number: u64, label: &str) -> Result<()> {
        Ok(Self::add_label(self, org, repo, number, label).await?)
    }
}
