//! POST /api/search - relay a free-text query to the backend

use axum::{
  extract::{rejection::JsonRejection, Extension, State},
  response::Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::server::{middleware::RequestContext, state::AppState};
use crate::types::SearchRequest;

/// Public message for any search failure past request validation
pub const SEARCH_FAILED: &str = "Failed to process request";

/// Forward `{ query }` to the backend and return its JSON unchanged
pub async fn search(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
  let Json(request) = payload.map_err(|rejection| {
    context.log_warn(&format!("Rejected search request: {rejection}"));
    ApiError::bad_request("Missing query")
  })?;

  context.log_info(&format!("Searching for {:?}", request.query));

  match state.backend.search_raw(&request).await {
    Ok(data) => Ok(Json(data)),
    Err(e) => {
      context.log_failure("Search", &e);
      Err(ApiError::internal(SEARCH_FAILED))
    }
  }
}
