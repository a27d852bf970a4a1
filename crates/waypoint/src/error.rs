//! Error taxonomy for backend-facing work and its mapping onto HTTP responses
//!
//! Every failure is classified into an [`ErrorKind`]. Transport details and
//! backend internals are logged where they happen and never copied into a
//! client-facing [`ErrorBody`] beyond the backend's own error message.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;
use crate::types::ErrorBody;

/// How many characters of an unparseable backend body are echoed back
pub const BODY_EXCERPT_CHARS: usize = 200;

/// Coarse classification used for status codes and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The backend location could not be resolved
  Configuration,
  /// The backend was unreachable or answered with a non-2xx status
  Network,
  /// The backend answered, but not with the agreed shape
  ContractViolation,
  /// The caller's request was incomplete
  Validation,
}

#[derive(Error, Debug)]
pub enum ProxyError {
  #[error(transparent)]
  Configuration(#[from] ConfigError),

  #[error("Backend request failed: {0}")]
  Unreachable(#[from] reqwest::Error),

  #[error("Backend error: {message}")]
  BackendStatus { status: u16, message: String, details: Option<Value> },

  #[error("Invalid JSON response: {excerpt}...")]
  MalformedBody { excerpt: String },

  #[error("Invalid data format received from backend")]
  InvalidFormat,

  #[error("{message}")]
  Validation { message: String },
}

impl ProxyError {
  /// Build an error from a non-2xx backend answer, keeping its own error and details
  pub fn backend_status(status: u16, body: &str) -> Self {
    match serde_json::from_str::<Value>(body) {
      Ok(parsed) => {
        let message = match parsed.get("error") {
          Some(Value::String(message)) => message.clone(),
          Some(other) => other.to_string(),
          None => format!("HTTP {status}"),
        };
        Self::BackendStatus { status, message, details: parsed.get("details").cloned() }
      }
      Err(_) => Self::BackendStatus {
        status,
        message: "Invalid response".to_string(),
        details: Some(Value::String(excerpt(body))),
      },
    }
  }

  pub fn malformed_body(body: &str) -> Self {
    Self::MalformedBody { excerpt: excerpt(body) }
  }

  pub fn missing_fields() -> Self {
    Self::Validation { message: "Missing required fields".to_string() }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Configuration(_) => ErrorKind::Configuration,
      Self::Unreachable(_) | Self::BackendStatus { .. } => ErrorKind::Network,
      Self::MalformedBody { .. } | Self::InvalidFormat => ErrorKind::ContractViolation,
      Self::Validation { .. } => ErrorKind::Validation,
    }
  }
}

/// First [`BODY_EXCERPT_CHARS`] characters of a body
pub fn excerpt(body: &str) -> String {
  body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// A client-facing error: a status code and a uniform `{ error, details? }` body
#[derive(Debug)]
pub struct ApiError {
  pub status: StatusCode,
  pub body: ErrorBody,
}

impl ApiError {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self { status, body: ErrorBody { error: message.into(), details: None } }
  }

  pub fn internal(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn with_details(mut self, details: Option<Value>) -> Self {
    self.body.details = details;
    self
  }
}

impl From<ProxyError> for ApiError {
  fn from(error: ProxyError) -> Self {
    match error {
      ProxyError::Validation { message } => Self::bad_request(message),
      ProxyError::Configuration(_) => Self::internal("Backend is not configured"),
      ProxyError::Unreachable(_) => Self::internal("Backend is unreachable"),
      ProxyError::BackendStatus { message, details, .. } => {
        Self::internal(format!("Backend error: {message}")).with_details(details)
      }
      other @ (ProxyError::MalformedBody { .. } | ProxyError::InvalidFormat) => {
        Self::internal(other.to_string())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(self.body)).into_response()
  }
}
