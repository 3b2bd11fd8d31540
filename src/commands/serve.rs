use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::routes;
use crate::state::AppState;

pub async fn run(settings: Settings, bind: Option<SocketAddr>) -> Result<()> {
    let addr = bind.unwrap_or(settings.bind);
    let state = AppState::new(&settings);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        epoch = %settings.roster.epoch,
        cycles_behind = settings.roster.cycles_behind,
        cycles_ahead = settings.roster.cycles_ahead,
        "roster-cycles listening on http://{}/roster-cycles",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
