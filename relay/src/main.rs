//! GitBot Web Server - GitHub webhook receiver.
//!
//! Receives GitHub webhook deliveries, authenticates them via HMAC
//! signature, and relays opened pull requests as Discord messages.
//! Missing configuration degrades gracefully: health checks keep
//! working, the webhook path fails closed.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gitbot::web::{app, AppState};
use gitbot::{Config, DiscordNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        webhook_secret_configured = config.github_webhook_secret.is_some(),
        discord_token_configured = config.discord_token.is_some(),
        discord_channel_configured = config.discord_channel_id.is_some(),
        "config_loaded"
    );

    // Create the Discord notifier; the client connects lazily on the
    // first notification.
    let notifier = DiscordNotifier::new(
        config.discord_token.clone(),
        config.discord_channel_id.clone(),
        Duration::from_millis(config.discord_request_timeout_ms),
    );

    // Create application state
    let state = AppState::new(config.clone(), Arc::new(notifier));

    // Build the router
    let router = app(state).layer(TraceLayer::new_for_http());

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
