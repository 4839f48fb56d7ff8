//! n2p-relay server binary.
//!
//! Reads configuration from the environment (and `.env` if present), then
//! serves the gateway until Ctrl-C.

use anyhow::Context;
use n2p_relay::{AppConfig, AppState, Net2Phone, gateway};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let provider = config
        .provider
        .clone()
        .map(Net2Phone::new)
        .transpose()
        .context("Failed to build net2phone client")?;

    info!(
        mock_send = config.gateway.mock_send,
        brand_tag = %config.gateway.brand_tag,
        start = config.gateway.allowed_start_hour,
        end = config.gateway.allowed_end_hour,
        provider = provider.is_some(),
        "Starting n2p-relay"
    );

    let app = gateway::router(AppState::new(config.gateway, provider));
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
