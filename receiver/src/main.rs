//! Hooklog web server.
//!
//! Binds the webhook router and serves until SIGINT or SIGTERM.

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hooklog::{router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration once; handlers only ever read it
    let config = Config::from_env();
    info!(
        host = %config.host,
        port = config.port,
        signature_verification = config.signature_verification_enabled(),
        "config_loaded"
    );

    if !config.signature_verification_enabled() {
        warn!("GITHUB_WEBHOOK_SECRET is not set; webhook signature verification is disabled");
    }

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.host, config.port))?;

    let addr = listener
        .local_addr()
        .context("Failed to read bound address")?;

    let app = router(AppState::new(config));

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!(address = %addr, "web_server_shutdown_complete");

    Ok(())
}

/// Resolve on SIGINT or SIGTERM; in-flight webhooks finish before exit.
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
        _ = ctrl_c => info!(signal = "SIGINT", "shutdown_signal_received"),
        _ = terminate => info!(signal = "SIGTERM", "shutdown_signal_received"),
    }

    info!("web_server_shutting_down");
}
