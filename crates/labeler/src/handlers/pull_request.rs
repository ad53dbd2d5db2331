//! GitHub pull request webhook handler.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::models::{PullRequestEvent, PullRequestRef};
use crate::reconcile::reconcile;
use crate::server::AppState;
use crate::webhooks::verify_signature;

/// Handle a GitHub webhook delivery.
///
/// Signature verification happens before any parsing; everything that is
/// not a triggering pull request event is acknowledged and ignored.
pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, StatusCode> {
    let event_type = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let delivery_id = headers
        .get("X-GitHub-Delivery")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    if let Some(secret) = &state.webhook_secret {
        let Some(signature) = headers
            .get("X-Hub-Signature-256")
            .and_then(|v| v.to_str().ok())
        else {
            warn!(delivery_id = %delivery_id, "Webhook rejected: missing signature");
            return Err(StatusCode::UNAUTHORIZED);
        };

        if !verify_signature(&body, signature, secret) {
            warn!(delivery_id = %delivery_id, "Webhook rejected: bad signature");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    info!(
        event_type = %event_type,
        delivery_id = %delivery_id,
        "Received GitHub webhook"
    );

    // Only process pull_request events
    if event_type != "pull_request" {
        debug!(event_type = %event_type, "Ignoring non-pull_request event");
        return Ok(Json(json!({
            "status": "ignored",
            "reason": "not_pull_request_event"
        })));
    }

    let event: PullRequestEvent = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Failed to parse pull_request payload");
        StatusCode::BAD_REQUEST
    })?;

    if !event.action.triggers_reconciliation() {
        debug!(action = ?event.action, "Ignoring non-triggering action");
        return Ok(Json(json!({
            "status": "ignored",
            "reason": "not_triggering_action"
        })));
    }

    let pr = PullRequestRef::from_event(&event);
    info!(
        org = %pr.org,
        repo = %pr.repo,
        pr = pr.number,
        base = %pr.base_ref,
        "Reconciling labels for pull request"
    );

    let snapshot = state
        .owners
        .load_repo_owners(&pr.org, &pr.repo, &pr.base_ref)
        .await
        .map_err(|e| {
            error!(
                org = %pr.org,
                repo = %pr.repo,
                pr = pr.number,
                error = %e,
                "Failed to load ownership data"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match reconcile(state.tracker.as_ref(), &snapshot, &pr).await {
        Ok(outcome) => Ok(Json(json!({
            "status": "reconciled",
            "pr": pr.number,
            "applied": outcome.applied,
            "skipped": outcome.skipped
        }))),
        Err(e) => {
            error!(pr = pr.number, error = %e, "Label reconciliation failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
