// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::application::poll_service::{PollEndpoints, PollService};
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_fetcher::HttpFetcher;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let addr = config.server.socket_addr()?;

    // Create fetcher (infrastructure layer)
    let fetcher = Arc::new(HttpFetcher::new(reqwest::Client::new()));

    // Create poller (application layer)
    let poll_service = PollService::new(
        fetcher,
        PollEndpoints {
            latest_url: config.api.latest_url(),
            series_url: config.api.series_url(),
        },
        config.polling.interval(),
        config.calibration(),
    );

    let state = Arc::new(AppState {
        poll_state: poll_service.subscribe(),
    });

    let cancel = CancellationToken::new();
    let poller = poll_service.start(cancel.clone());

    // Build router (presentation layer)
    let router = build_router(state);

    tracing::info!("Starting tank-level-dashboard on {}", addr);
    let shutdown = cancel.clone();
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            shutdown.cancel();
        })
        .await?;

    // Teardown: no further ticks once the view is gone
    cancel.cancel();
    poller.await?;

    Ok(())
}
