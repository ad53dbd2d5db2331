//! Ownership-label reconciliation for pull requests.
//!
//! This crate provides:
//! - Webhook payload models and signature verification
//! - The label reconciliation pipeline (the decision core)
//! - The tracker capability interface injected into the pipeline
//! - HTTP server and handlers for the GitHub webhook surface
//!
//! The rule it enforces: the labels declared by the OWNERS files governing
//! a pull request's changed files must be present on the pull request.
//! Labels are only ever added, never removed, and labels missing from the
//! repository's vocabulary are reported but never created.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Async API seams can fail the usual ways

pub mod handlers;
pub mod models;
pub mod plugin;
pub mod reconcile;
pub mod server;
pub mod tracker;
pub mod webhooks;

pub use models::{PullRequestAction, PullRequestEvent, PullRequestRef};
pub use reconcile::{reconcile, ReconcileOutcome};
pub use tracker::TrackerClient;
pub use webhooks::verify_signature;
