//! POST /api/submit-site - validate and forward a new destination

use axum::{
  extract::{rejection::JsonRejection, Extension, State},
  response::Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::server::{middleware::RequestContext, state::AppState};
use crate::types::{NewSiteRequest, SubmitResponse};

/// Public message for any backend-side submission failure
pub const SUBMIT_FAILED: &str = "Failed to submit site to backend";

pub async fn submit_site(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
  // An unreadable body is treated as one with every field missing
  let payload = payload.map(|Json(value)| value).unwrap_or_else(|rejection| {
    context.log_warn(&format!("Unreadable submission body: {rejection}"));
    Value::Null
  });

  forward_submission(&state, &context, &payload).await.map(Json)
}

/// Validate locally, then forward the full payload. The backend is never
/// contacted when a required field is missing.
pub(crate) async fn forward_submission(
  state: &AppState,
  context: &RequestContext,
  payload: &Value,
) -> Result<SubmitResponse, ApiError> {
  let request = NewSiteRequest::from_payload(payload).map_err(|e| {
    context.log_warn(&format!("Rejected submission: {e}"));
    ApiError::from(e)
  })?;

  match state.backend.submit_site(payload).await {
    Ok(result) => {
      context.log_info(&format!("Submitted site {:?}", request.name));
      Ok(SubmitResponse::accepted(result))
    }
    Err(e) => {
      context.log_failure("Submitting site", &e);
      Err(ApiError::internal(SUBMIT_FAILED))
    }
  }
}
