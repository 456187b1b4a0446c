//! Axum handlers for the webhook surface.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::{ActionDispatcher, TurnContext};
use crate::domain::SlotValues;

use super::dto::{WebhookRequest, WebhookResponse};

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookAppState {
    pub dispatcher: Arc<ActionDispatcher>,
}

/// POST /webhook - runs one fulfillment turn.
pub async fn run_action(
    State(state): State<WebhookAppState>,
    Json(request): Json<WebhookRequest>,
) -> Json<WebhookResponse> {
    info!(
        action = %request.next_action,
        sender_id = %request.sender_id,
        "webhook turn"
    );

    let ctx = TurnContext::new(
        SlotValues::new(request.tracker.slots),
        request.tracker.latest_message.text,
        Utc::now().date_naive(),
    );
    let outcome = state.dispatcher.dispatch(&request.next_action, &ctx).await;

    Json(WebhookResponse::from(outcome))
}

/// GET /health - liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}
