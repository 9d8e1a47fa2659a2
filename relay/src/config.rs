//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables. Missing secrets
//! do not abort startup: the server keeps serving health checks, the
//! webhook path fails closed, and the notifier reports itself as
//! unconfigured.

use std::env;
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret for GitHub webhook signature verification.
    ///
    /// When unset, every webhook POST is rejected with 401.
    pub github_webhook_secret: Option<String>,

    /// Discord bot token used for message delivery.
    pub discord_token: Option<String>,

    /// Discord channel ID that receives pull request notifications.
    pub discord_channel_id: Option<String>,

    /// HTTP request timeout for outbound Discord calls, in milliseconds.
    pub discord_request_timeout_ms: u64,

    /// Port for the web server to listen on.
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            github_webhook_secret: non_empty_var("GITHUB_WEBHOOK_SECRET"),

            discord_token: non_empty_var("DISCORD_TOKEN"),

            discord_channel_id: non_empty_var("CHANNEL_ID"),

            discord_request_timeout_ms: env::var("DISCORD_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

/// Read an environment variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(v) if v.trim().is_empty() => {
            warn!(env_var = name, "environment variable set but blank, ignoring");
            None
        }
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_var_set() {
        env::set_var("TEST_RELAY_VAR", "value");
        assert_eq!(non_empty_var("TEST_RELAY_VAR"), Some("value".to_string()));
        env::remove_var("TEST_RELAY_VAR");
    }

    #[test]
    fn test_non_empty_var_blank() {
        env::set_var("TEST_RELAY_BLANK", "   ");
        assert_eq!(non_empty_var("TEST_RELAY_BLANK"), None);
        env::remove_var("TEST_RELAY_BLANK");
    }

    #[test]
    fn test_non_empty_var_unset() {
        assert_eq!(non_empty_var("TEST_RELAY_NONEXISTENT"), None);
    }
}
