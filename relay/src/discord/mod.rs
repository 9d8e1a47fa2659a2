//! Discord notification delivery.

pub mod message;
pub mod notifier;

pub use message::format_pull_request_message;
pub use notifier::{DiscordNotifier, Notifier, NotifyError};
