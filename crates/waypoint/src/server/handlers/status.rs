//! Status and version endpoint handlers

use axum::{extract::State, response::Json};

use crate::server::state::AppState;
use crate::types::{StatusResponse, VersionResponse};

/// GET /status - Health check endpoint
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
  Json(StatusResponse {
    status: "healthy".to_string(),
    backend_url: state.backend.base_url().to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
  })
}

/// GET /version - Returns current version
pub async fn version() -> Json<VersionResponse> {
  Json(VersionResponse { version: env!("CARGO_PKG_VERSION").to_string() })
}
