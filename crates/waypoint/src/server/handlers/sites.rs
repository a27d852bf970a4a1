//! GET /api/sites - relay the full destination list

use axum::{
  extract::{Extension, State},
  response::Json,
};
use serde_json::Value;

use crate::error::{ApiError, ProxyError};
use crate::server::{middleware::RequestContext, state::AppState};

/// Relay `{ sites: [...] }` once `sites` is confirmed to be an array
pub async fn list_sites(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Result<Json<Value>, ApiError> {
  match state.backend.list_sites_raw().await {
    Ok(data) => Ok(Json(data)),
    Err(e) => {
      context.log_failure("Fetching sites", &e);
      Err(sites_error(e))
    }
  }
}

/// Client-facing error for a failed listing
pub(crate) fn sites_error(error: ProxyError) -> ApiError {
  match error {
    ProxyError::Unreachable(_) => ApiError::internal("Failed to fetch sites"),
    other => other.into(),
  }
}
