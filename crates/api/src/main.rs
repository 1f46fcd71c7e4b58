//! LaunchBot - scheduled F1 car launch announcements
//!
//! Main entry point: loads configuration, wires the context, optionally
//! starts the cron triggers and serves the HTTP surface.

use std::sync::Arc;

use anyhow::Context;
use launchbot_api::utils::logging::init_tracing;
use launchbot_api::{router, AppContext};
use launchbot_infra::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file before reading config
    let dotenv = dotenvy::dotenv();

    let config = config::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env file loaded"),
    }

    let bind_addr = config.server.bind_addr.clone();
    let ctx = Arc::new(AppContext::new_with_config(config).await?);
    ctx.start_scheduler().await?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "launchbot listening");

    axum::serve(listener, router(ctx.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ctx.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
