//! HTTP server wiring for the webhook surface.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use owners::OwnersLoader;

use crate::handlers;
use crate::plugin::{self, PluginHelp};
use crate::tracker::TrackerClient;

/// Shared state for webhook handling.
pub struct AppState {
    /// Tracker the reconciler reads from and writes to
    pub tracker: Arc<dyn TrackerClient>,
    /// Ownership snapshot loader
    pub owners: Arc<dyn OwnersLoader>,
    /// Webhook signing secret; verification is skipped when unset
    pub webhook_secret: Option<String>,
}

/// Build the service router.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/hooks", post(handlers::handle_webhook))
        .route("/healthz", get(healthz))
        .route("/plugin-help", get(plugin_help))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn plugin_help() -> Json<PluginHelp> {
    Json(plugin::help())
}
