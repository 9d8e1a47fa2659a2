//! Webhook endpoint handlers.
//!
//! The webhook handler owns the full response-status contract:
//! - signature failure → 401 `invalid signature`
//! - unparseable body → 400 `invalid json`
//! - routed and delivered, or ignored → 200 `OK`
//! - routed but delivery failed → 200 `Received` (error swallowed)
//!
//! The swallow-then-200 policy is deliberate: surfacing delivery
//! failures would make GitHub retry-storm the endpoint over transient
//! Discord outages.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::discord::Notifier;
use crate::github::{parse_payload, route, verify_github_signature, WebhookAction};
use crate::VERSION;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            notifier,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "gitbot-relay",
        version: VERSION,
    })
}

/// Info response for a GET on the webhook route.
pub async fn webhook_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true, "route": "/webhooks/github" }))
}

// =============================================================================
// GitHub Webhook
// =============================================================================

/// GitHub webhook endpoint.
///
/// The body arrives as raw [`Bytes`]: the signature covers the exact
/// bytes GitHub sent, so verification must happen before any parsing
/// or re-encoding.
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let delivery_id = header_str(&headers, "x-github-delivery");
    let event_type = header_str(&headers, "x-github-event");

    info!(
        delivery_id,
        event_type,
        body_length = body.len(),
        "github_webhook_received"
    );

    let signature = header_str(&headers, "x-hub-signature-256");
    let secret = state.config.github_webhook_secret.as_deref().unwrap_or("");

    // 401 covers missing secret, missing header, and digest mismatch
    // alike; the response never reveals which one it was.
    if !verify_github_signature(secret, signature, &body) {
        warn!(delivery_id, "github_signature_invalid");
        return (StatusCode::UNAUTHORIZED, "invalid signature").into_response();
    }

    let payload = match parse_payload(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(delivery_id, error = %e, "github_payload_invalid_json");
            return (StatusCode::BAD_REQUEST, "invalid json").into_response();
        }
    };

    match route(event_type, &payload) {
        WebhookAction::Notify(notification) => {
            match state.notifier.notify_pull_request(&notification).await {
                Ok(()) => {
                    info!(
                        delivery_id,
                        repo = notification.repo.as_deref().unwrap_or_default(),
                        title = notification.title.as_deref().unwrap_or_default(),
                        "pull_request_notified"
                    );
                    (StatusCode::OK, "OK").into_response()
                }
                Err(e) => {
                    error!(delivery_id, error = %e, "discord_delivery_failed");
                    (StatusCode::OK, "Received").into_response()
                }
            }
        }
        WebhookAction::Ignore => {
            info!(delivery_id, event_type, "github_event_ignored");
            (StatusCode::OK, "OK").into_response()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
