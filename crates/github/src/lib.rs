//! Minimal GitHub REST client for the labelbot service.
//!
//! This crate covers exactly the API surface the labeler needs:
//! - pull request changed files
//! - repository label vocabulary
//! - labels currently applied to an issue/PR
//! - adding a single label
//! - raw file contents and tree listings (used by the OWNERS loader)
//!
//! The base URL is overridable so tests can point the client at a local
//! mock server, and so the service works against GitHub Enterprise hosts.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // All API methods can fail the same ways

pub mod client;
pub mod error;
pub mod models;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use models::{Label, PullRequestChange};
