//! Shared handler state

use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::AppConfig;
use crate::error::ProxyError;

/// Configuration and backend client handed to every handler.
/// Built per server (or per test), never stored globally.
#[derive(Debug, Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub backend: BackendClient,
}

impl AppState {
  pub fn new(config: AppConfig) -> Result<Self, ProxyError> {
    let backend = BackendClient::new(&config)?;
    Ok(Self { config: Arc::new(config), backend })
  }

  pub fn maps_api_key(&self) -> Option<&str> {
    self.config.maps_api_key.as_deref()
  }
}
