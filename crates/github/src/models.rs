//! Wire models for the GitHub API responses the client consumes.

use serde::Deserialize;

/// A label as returned by the labels and issue-labels endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,
    /// Label color
    #[serde(default)]
    pub color: Option<String>,
}

/// One changed file in a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestChange {
    /// Repo-relative path of the changed file
    pub filename: String,
    /// Change status (added, modified, removed, renamed)
    #[serde(default)]
    pub status: Option<String>,
    /// Lines added
    #[serde(default)]
    pub additions: u64,
    /// Lines removed
    #[serde(default)]
    pub deletions: u64,
}
