//! Waypoint Server
//!
//! Serves the Destination Recommender pages and the JSON proxy routes in front
//! of the recommendation backend.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use waypoint::config::{AppConfig, ServerArgs};
use waypoint::server::{startup::start_server, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
  let args = ServerArgs::parse();

  let filter = if args.verbose {
    // Verbose mode: debug for our own code, including backend response diagnostics
    EnvFilter::new("waypoint=debug,tower_http=debug,info")
  } else {
    EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new("waypoint=info,tower_http=info,warn"))
  };

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  info!("Starting Waypoint Server v{}", env!("CARGO_PKG_VERSION"));
  info!("Binding to address: {}", args.bind);

  let config = AppConfig::from_args(&args).context("Invalid backend configuration")?;
  let state = AppState::new(config).context("Failed to create backend client")?;

  start_server(args.bind, state).await
}
