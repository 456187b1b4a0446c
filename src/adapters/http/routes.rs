//! Axum routes for the webhook surface.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, run_action, WebhookAppState};

/// Creates the webhook router.
///
/// Endpoints:
/// - POST /webhook - run one fulfillment action
/// - GET /health - liveness probe
pub fn webhook_router(state: WebhookAppState) -> Router {
    Router::new()
        .route("/webhook", post(run_action))
        .route("/health", get(health))
        .with_state(state)
}
