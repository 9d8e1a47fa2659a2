//! Discord message delivery with connection management.
//!
//! The notifier keeps one lazily-initialized HTTP client shared across
//! all requests. The first notification validates the bot token against
//! the Discord API before anything is cached, so a failed login is
//! retried on the next request instead of wedging the notifier. A
//! delivery failure drops the cached client for the same reason.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::discord::message::format_pull_request_message;
use crate::github::PullRequestNotification;

/// Base URL of the Discord REST API.
pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Delivery failure. The webhook handler logs these and still responds
/// with success; a delivery error must never surface to the webhook
/// sender.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("discord token or channel id not configured")]
    NotConfigured,
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("discord login rejected with status {0}")]
    LoginRejected(StatusCode),
    #[error("discord api returned status {0}")]
    ApiStatus(StatusCode),
    #[error("discord request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Delivery seam for the webhook handler.
///
/// The production implementation is [`DiscordNotifier`]; tests inject a
/// recording fake.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Format and deliver a pull request notification.
    async fn notify_pull_request(
        &self,
        notification: &PullRequestNotification,
    ) -> Result<(), NotifyError>;
}

/// Discord REST API notifier with a shared, memoized client.
#[derive(Clone)]
pub struct DiscordNotifier {
    inner: Arc<NotifierInner>,
}

struct NotifierInner {
    token: Option<String>,
    channel_id: Option<String>,
    api_base: String,
    timeout: Duration,
    client: RwLock<Option<Client>>,
}

impl DiscordNotifier {
    /// Create a notifier against the public Discord API.
    ///
    /// Missing token or channel does not fail here; delivery reports
    /// [`NotifyError::NotConfigured`] so the server keeps running.
    pub fn new(token: Option<String>, channel_id: Option<String>, timeout: Duration) -> Self {
        Self::with_api_base(token, channel_id, timeout, DISCORD_API_BASE.to_string())
    }

    /// Create a notifier against an alternate API base URL.
    pub fn with_api_base(
        token: Option<String>,
        channel_id: Option<String>,
        timeout: Duration,
        api_base: String,
    ) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                token,
                channel_id,
                api_base,
                timeout,
                client: RwLock::new(None),
            }),
        }
    }

    /// Return the cached client, logging in first if necessary.
    async fn ensure_client(&self) -> Result<Client, NotifyError> {
        {
            let client = self.inner.client.read().await;
            if let Some(c) = client.as_ref() {
                return Ok(c.clone());
            }
        }

        let token = self
            .inner
            .token
            .as_deref()
            .ok_or(NotifyError::NotConfigured)?;

        let mut slot = self.inner.client.write().await;

        // Double-check after acquiring the write lock so concurrent
        // requests share a single login instead of racing.
        if let Some(c) = slot.as_ref() {
            return Ok(c.clone());
        }

        info!("discord_client_connecting");

        let client = Client::builder()
            .timeout(self.inner.timeout)
            .build()
            .map_err(NotifyError::ClientBuild)?;

        // Validate the token before caching anything. A rejected login
        // leaves the slot empty, so the next request retries from
        // scratch instead of reusing a dead session.
        let response = client
            .get(format!("{}/users/@me", self.inner.api_base))
            .header("Authorization", format!("Bot {token}"))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "discord_login_rejected");
            return Err(NotifyError::LoginRejected(response.status()));
        }

        info!("discord_client_ready");

        *slot = Some(client.clone());

        Ok(client)
    }

    /// Drop the cached client so the next delivery re-initializes.
    async fn invalidate(&self) {
        let mut slot = self.inner.client.write().await;
        if slot.take().is_some() {
            warn!("discord_client_invalidated");
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify_pull_request(
        &self,
        notification: &PullRequestNotification,
    ) -> Result<(), NotifyError> {
        let (Some(token), Some(channel_id)) = (
            self.inner.token.as_deref(),
            self.inner.channel_id.as_deref(),
        ) else {
            warn!(
                token_configured = self.inner.token.is_some(),
                channel_configured = self.inner.channel_id.is_some(),
                "discord_not_configured"
            );
            return Err(NotifyError::NotConfigured);
        };

        let client = self.ensure_client().await?;

        let content = format_pull_request_message(notification);

        let result = client
            .post(format!(
                "{}/channels/{}/messages",
                self.inner.api_base, channel_id
            ))
            .header("Authorization", format!("Bot {token}"))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(
                    channel_id = channel_id,
                    repo = notification.repo.as_deref().unwrap_or_default(),
                    "discord_message_sent"
                );
                Ok(())
            }
            Ok(response) => {
                let status = response.status();
                self.invalidate().await;
                Err(NotifyError::ApiStatus(status))
            }
            Err(e) => {
                self.invalidate().await;
                Err(NotifyError::Http(e))
            }
        }
    }
}
