//! Request context middleware
//!
//! Tags every request with an id, logs its start and completion, and makes the
//! context available to handlers as an `Extension`.

use axum::{
  extract::Request,
  http::{Method, Uri},
  middleware::Next,
  response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ProxyError;

/// Request id and metadata for log correlation
#[derive(Debug, Clone)]
pub struct RequestContext {
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  pub user_agent: String,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, user_agent: Option<&str>) -> Self {
    Self {
      request_id: Uuid::new_v4(),
      method,
      uri,
      user_agent: user_agent.unwrap_or("none").to_string(),
    }
  }

  pub fn log_info(&self, message: &str) {
    info!(request_id = %self.request_id, method = %self.method, path = self.uri.path(), "{message}");
  }

  pub fn log_warn(&self, message: &str) {
    warn!(request_id = %self.request_id, method = %self.method, path = self.uri.path(), "{message}");
  }

  /// Log a proxy failure with its kind and full internal detail
  pub fn log_failure(&self, action: &str, failure: &ProxyError) {
    error!(
      request_id = %self.request_id,
      method = %self.method,
      path = self.uri.path(),
      kind = ?failure.kind(),
      "{action} failed: {failure:?}"
    );
  }
}

/// Attach a [`RequestContext`] to the request and log its lifecycle
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
  let user_agent = request.headers().get("user-agent").and_then(|v| v.to_str().ok());
  let context = RequestContext::new(request.method().clone(), request.uri().clone(), user_agent);

  let start = Instant::now();
  info!(
    request_id = %context.request_id,
    method = %context.method,
    path = context.uri.path(),
    user_agent = %context.user_agent,
    "Request started"
  );

  request.extensions_mut().insert(context.clone());
  let response = next.run(request).await;

  let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
  info!(
    request_id = %context.request_id,
    method = %context.method,
    path = context.uri.path(),
    status = response.status().as_u16(),
    duration_ms,
    "Request completed"
  );

  response
}
