// Restaurant listing scraper: HTTP job API
//
// Serves GET/POST /scrape, GET /data/:city and job status endpoints on
// port 5000 by default. See `--help` for flags and environment overrides.

use anyhow::{Context, Result};
use clap::Parser;
use restaurant_scrape::{AppState, ChromiumRendererFactory, ServerArgs, ServerConfig, build_router};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_args(ServerArgs::parse())?;
    let bind = config.bind;

    let renderer = Arc::new(ChromiumRendererFactory::new(
        config.scrape.chrome_data_dir().cloned(),
    ));
    let state = AppState::new(config, renderer);

    // Finished jobs are swept after the retention period
    Arc::new(state.jobs.clone()).start_cleanup_task();

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;

    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
