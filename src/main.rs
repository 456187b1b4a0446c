//! Cinebot action server entry point.
//!
//! Loads configuration, wires the booking backend client into the action
//! dispatcher and serves the dialogue-engine webhook.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cinebot::adapters::backend::HttpBookingApi;
use cinebot::adapters::http::{webhook_router, WebhookAppState};
use cinebot::application::ActionDispatcher;
use cinebot::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!(
        backend = %config.backend.base_url,
        "starting cinebot action server"
    );

    let api = Arc::new(HttpBookingApi::new(config.backend.clone()));
    let dispatcher = Arc::new(ActionDispatcher::new(
        api,
        config.backend.payment_base_url.clone(),
    ));

    let cors = match config.server.cors_origins_list().as_slice() {
        [] => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
        origins => {
            let parsed = origins
                .iter()
                .map(|origin| origin.parse::<HeaderValue>())
                .collect::<Result<Vec<_>, _>>()?;
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = webhook_router(WebhookAppState { dispatcher })
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
