//! Error types for the GitHub API client.

use thiserror::Error;

/// Errors that can occur when talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub returned a non-success status
    #[error("GitHub API returned {status} for {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    /// Response payload could not be decoded
    #[error("failed to decode response payload: {0}")]
    Decode(String),

    /// Tree listing was truncated by the API and cannot be trusted
    #[error("tree listing at {reference} is truncated")]
    TruncatedTree { reference: String },
}
