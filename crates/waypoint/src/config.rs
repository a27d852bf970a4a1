//! Server configuration and backend URL resolution
//!
//! The backend base URL is resolved once from an explicit [`BackendSettings`]
//! record and then threaded through [`AppConfig`] into every proxy call.
//! Resolution order:
//!
//! 1. an explicit backend URL
//! 2. the local development address, when development mode is on
//! 3. `https://{deployment host}`
//!
//! Anything else is a [`ConfigError`]; there is no silent fallback outside
//! development mode.

use clap::{Args, Parser};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Address of the backend when running locally
pub const LOCAL_BACKEND_URL: &str = "http://localhost:5000";

/// Outbound request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  #[error(
    "No backend location configured: set BACKEND_URL or DEPLOYMENT_HOST, or enable development mode"
  )]
  MissingDeploymentHost,

  #[error("Invalid backend URL '{url}': {reason}")]
  InvalidBackendUrl { url: String, reason: String },
}

impl ConfigError {
  pub fn invalid_backend_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::InvalidBackendUrl { url: url.into(), reason: reason.into() }
  }
}

/// Command line and environment options for the server binary
#[derive(Parser, Debug, Clone)]
#[command(name = "waypoint_server")]
#[command(about = "Destination Recommender web frontend")]
#[command(version)]
pub struct ServerArgs {
  /// Server bind address
  #[arg(long, env = "WAYPOINT_BIND", default_value = "127.0.0.1:3000")]
  pub bind: SocketAddr,

  #[command(flatten)]
  pub backend: BackendSettings,

  /// Google Maps API key used by the map pages
  #[arg(long, env = "GOOGLE_MAPS_API_KEY")]
  pub maps_api_key: Option<String>,

  /// Timeout for calls to the backend, in seconds
  #[arg(long, env = "WAYPOINT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
  pub timeout_secs: u64,

  /// Enable verbose logging
  #[arg(short, long)]
  pub verbose: bool,
}

/// Everything that decides where the backend lives
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
  /// Fully specified backend base URL; wins over every other setting
  #[arg(long, env = "BACKEND_URL")]
  pub backend_url: Option<String>,

  /// Development mode: talk to the local backend
  #[arg(long, env = "WAYPOINT_DEVELOPMENT")]
  pub development: bool,

  /// Hostname of the deployment serving the backend (protocol optional)
  #[arg(long, env = "DEPLOYMENT_HOST")]
  pub deployment_host: Option<String>,

  /// Backend address used in development mode
  #[arg(long, env = "WAYPOINT_LOCAL_BACKEND_URL", default_value = LOCAL_BACKEND_URL)]
  pub local_backend_url: String,
}

impl Default for BackendSettings {
  fn default() -> Self {
    Self {
      backend_url: None,
      development: false,
      deployment_host: None,
      local_backend_url: LOCAL_BACKEND_URL.to_string(),
    }
  }
}

impl BackendSettings {
  /// Resolve the backend base URL. Pure: the same settings always give the same URL.
  pub fn resolve(&self) -> Result<BackendUrl, ConfigError> {
    if let Some(explicit) = non_blank(self.backend_url.as_deref()) {
      return BackendUrl::parse(explicit);
    }

    if self.development {
      return BackendUrl::parse(&self.local_backend_url);
    }

    match non_blank(self.deployment_host.as_deref()) {
      Some(host) => BackendUrl::parse(&format!("https://{}", strip_scheme(host))),
      None => Err(ConfigError::MissingDeploymentHost),
    }
  }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
  value.map(str::trim).filter(|v| !v.is_empty())
}

fn strip_scheme(host: &str) -> &str {
  let host = host.trim();
  ["https://", "http://"]
    .into_iter()
    .find_map(|scheme| {
      let prefix = host.get(..scheme.len())?;
      prefix.eq_ignore_ascii_case(scheme).then(|| &host[scheme.len()..])
    })
    .unwrap_or(host)
    .trim_end_matches('/')
}

/// Backend base URL with no trailing slash, used as a prefix for endpoint paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendUrl(String);

impl BackendUrl {
  /// Validate an absolute http(s) URL and normalize away trailing slashes
  pub fn parse(raw: &str) -> Result<Self, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed)
      .map_err(|e| ConfigError::invalid_backend_url(trimmed, e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
      return Err(ConfigError::invalid_backend_url(trimmed, "scheme must be http or https"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
      return Err(ConfigError::invalid_backend_url(trimmed, "missing host"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
      return Err(ConfigError::invalid_backend_url(trimmed, "must not carry a query or fragment"));
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Join an endpoint path onto the base URL
  pub fn endpoint(&self, path: &str) -> String {
    format!("{}/{}", self.0, path.trim_start_matches('/'))
  }
}

impl fmt::Display for BackendUrl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Resolved configuration shared by every handler
#[derive(Debug, Clone)]
pub struct AppConfig {
  pub backend_url: BackendUrl,
  pub maps_api_key: Option<String>,
  pub timeout: Duration,
}

impl AppConfig {
  pub fn new(backend_url: BackendUrl) -> Self {
    Self { backend_url, maps_api_key: None, timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
  }

  pub fn with_maps_api_key(mut self, key: impl Into<String>) -> Self {
    self.maps_api_key = Some(key.into());
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Build the configuration from parsed arguments, failing fast on an unresolvable backend
  pub fn from_args(args: &ServerArgs) -> Result<Self, ConfigError> {
    let backend_url = args.backend.resolve()?;
    let maps_api_key = non_blank(args.maps_api_key.as_deref()).map(str::to_string);

    Ok(Self { backend_url, maps_api_key, timeout: Duration::from_secs(args.timeout_secs) })
  }
}
