//! GitHub webhook handling: signature verification and event routing.

pub mod event;
pub mod signature;

pub use event::{parse_payload, route, PullRequestNotification, WebhookAction};
pub use signature::verify_github_signature;
