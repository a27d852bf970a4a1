//! Server startup

use anyhow::{Context, Result};
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::server::routing::create_router;
use crate::server::state::AppState;

/// Bind and serve until interrupted
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
  info!("Forwarding to backend at {}", state.backend.base_url());
  if state.maps_api_key().is_none() {
    warn!("No maps API key configured; map views will be unavailable");
  }

  let app = create_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

  let listener = TcpListener::bind(addr).await.with_context(|| format!("Failed to bind {addr}"))?;
  info!("Server listening on {addr}");

  serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

  info!("Server shutdown gracefully");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!("Failed to listen for shutdown signal: {e}");
  }
}
