//! Web server module for handling inbound GitHub webhooks.
//!
//! A thin HTTP surface: health/info routes plus the webhook endpoint
//! that verifies the delivery signature, parses the payload, routes the
//! event, and drives the notifier. Delivery failures never change the
//! response status.

pub mod handlers;

use axum::routing::get;
use axum::Router;

pub use handlers::{github_webhook, health, webhook_info, AppState, HealthResponse};

/// Build the application router. Binaries and tests share this so the
/// routing table is exercised exactly as deployed.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route(
            "/webhooks/github",
            get(handlers::webhook_info).post(handlers::github_webhook),
        )
        .with_state(state)
}
