//! GitHub webhook payload models.

use serde::Deserialize;

/// Pull request event action.
///
/// Only the three reconciliation triggers are distinguished; everything
/// else deserializes to [`PullRequestAction::Other`] so novel actions are
/// ignored instead of failing the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestAction {
    /// PR opened
    Opened,
    /// PR reopened after being closed
    Reopened,
    /// New commits pushed to the PR branch
    Synchronize,
    /// Any other action
    #[serde(other)]
    Other,
}

impl PullRequestAction {
    /// Whether this action triggers a reconciliation pass.
    #[must_use]
    pub const fn triggers_reconciliation(self) -> bool {
        matches!(self, Self::Opened | Self::Reopened | Self::Synchronize)
    }
}

/// GitHub pull request event payload (simplified).
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// Action type
    pub action: PullRequestAction,
    /// PR number
    pub number: u64,
    /// Pull request details
    pub pull_request: PullRequest,
    /// Repository info
    pub repository: Repository,
}

/// GitHub pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Target branch
    pub base: GitRef,
    /// PR title
    #[serde(default)]
    pub title: Option<String>,
}

/// Git reference (branch).
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// SHA
    #[serde(default)]
    pub sha: Option<String>,
}

/// GitHub repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// Repository owner
    pub owner: RepoOwner,
    /// Full name (org/repo)
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Repository owner.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    /// Owner login
    pub login: String,
}

/// The target of one reconciliation pass, immutable for its duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// Organization (repository owner login)
    pub org: String,
    /// Repository name
    pub repo: String,
    /// Pull request number
    pub number: u64,
    /// Base branch the PR targets
    pub base_ref: String,
}

impl PullRequestRef {
    /// Extract the reconciliation target from an event payload.
    #[must_use]
    pub fn from_event(event: &PullRequestEvent) -> Self {
        Self {
            org: event.repository.owner.login.clone(),
            repo: event.repository.name.clone(),
            number: event.number,
            base_ref: event.pull_request.base.ref_name.clone(),
        }
    }
}
