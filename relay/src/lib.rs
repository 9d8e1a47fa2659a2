//! GitBot Relay - GitHub webhook to Discord notification relay.
//!
//! This library provides shared modules for the two binaries:
//! - `gitbot-web`: HTTP server receiving GitHub webhook deliveries
//! - `gitbot-webhook-test`: Manual end-to-end tester for a running relay
//!
//! ## Architecture
//!
//! ```text
//! GitHub webhook → signature verify → parse → route → Discord channel
//! ```
//!
//! Delivery is fire-and-forget and at-most-once: nothing is queued,
//! retried, or persisted, and no state survives a restart.

pub mod config;
pub mod discord;
pub mod github;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use discord::{DiscordNotifier, Notifier, NotifyError};
pub use github::{PullRequestNotification, WebhookAction};
pub use web::AppState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
