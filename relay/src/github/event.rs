//! Webhook payload parsing and event routing.
//!
//! Payloads stay untyped (`serde_json::Value`): GitHub event schemas
//! are large and the relay only reads a handful of fields, all of them
//! defensively. The routing table recognizes exactly one event/action
//! pair; adding an event is adding a match arm.

use serde_json::Value;

/// Parse a raw webhook body as JSON.
///
/// Invalid UTF-8 and invalid JSON are the same failure: the caller
/// answers HTTP 400 without attempting recovery.
pub fn parse_payload(raw: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(raw)
}

/// Fields extracted from a `pull_request`/`opened` delivery.
///
/// Every field is optional; missing values render as a placeholder in
/// the outgoing message rather than failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestNotification {
    pub repo: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub base_ref: Option<String>,
    pub head_ref: Option<String>,
    pub url: Option<String>,
}

impl PullRequestNotification {
    fn from_payload(payload: &Value) -> Self {
        Self {
            repo: str_at(payload, "/repository/full_name"),
            title: str_at(payload, "/pull_request/title"),
            author: str_at(payload, "/pull_request/user/login"),
            base_ref: str_at(payload, "/pull_request/base/ref"),
            head_ref: str_at(payload, "/pull_request/head/ref"),
            url: str_at(payload, "/pull_request/html_url"),
        }
    }
}

/// The routing decision for one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookAction {
    /// Deliver a notification to the chat channel.
    Notify(PullRequestNotification),
    /// No-op; the delivery is acknowledged but nothing is sent.
    Ignore,
}

/// Decide whether a delivery produces a notification.
///
/// Only `pull_request` events with `action == "opened"` notify. Every
/// other combination, including other pull request actions, `ping`,
/// `push`, and unknown event types, is ignored.
pub fn route(event_type: &str, payload: &Value) -> WebhookAction {
    let action = payload.get("action").and_then(Value::as_str).unwrap_or("");

    match (event_type, action) {
        ("pull_request", "opened") => {
            WebhookAction::Notify(PullRequestNotification::from_payload(payload))
        }
        _ => WebhookAction::Ignore,
    }
}

fn str_at(payload: &Value, pointer: &str) -> Option<String> {
    payload
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}
