//! Thin reqwest wrapper around the three backend endpoints
//!
//! The `*_raw` methods return the backend JSON untouched so the proxy routes can
//! relay it verbatim; the typed methods deserialize it for the pages.

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{AppConfig, BackendUrl};
use crate::error::ProxyError;
use crate::types::{SearchRequest, SearchResponse, Site, SitesResponse, SubmissionResult};

pub const SEARCH_PATH: &str = "process_search";
pub const SITES_PATH: &str = "all_sites";
pub const SUBMIT_PATH: &str = "submit_site";

/// Client for the recommendation backend
#[derive(Debug, Clone)]
pub struct BackendClient {
  client: Client,
  base_url: BackendUrl,
}

impl BackendClient {
  pub fn new(config: &AppConfig) -> Result<Self, ProxyError> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, base_url: config.backend_url.clone() })
  }

  pub fn base_url(&self) -> &BackendUrl {
    &self.base_url
  }

  /// Forward a search query and return the backend's JSON unchanged
  pub async fn search_raw(&self, request: &SearchRequest) -> Result<Value, ProxyError> {
    let url = self.base_url.endpoint(SEARCH_PATH);
    debug!(%url, query = %request.query, "forwarding search query");

    let response = self.client.post(&url).json(request).send().await?;
    let (status, body) = read_body(response).await?;

    if !status.is_success() {
      return Err(ProxyError::backend_status(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|_| ProxyError::malformed_body(&body))
  }

  /// Search and deserialize the ranked results
  pub async fn search(&self, query: &str) -> Result<SearchResponse, ProxyError> {
    let raw = self.search_raw(&SearchRequest { query: query.to_string() }).await?;
    serde_json::from_value(raw).map_err(|e| {
      warn!("Search response did not match the expected shape: {e}");
      ProxyError::InvalidFormat
    })
  }

  /// Fetch every known site, checking that `sites` is an array before relaying the body
  pub async fn list_sites_raw(&self) -> Result<Value, ProxyError> {
    let url = self.base_url.endpoint(SITES_PATH);
    debug!(%url, "fetching all sites");

    let response = self
      .client
      .get(&url)
      .header(reqwest::header::ACCEPT, "application/json")
      .send()
      .await?;

    debug!(status = %response.status(), headers = ?response.headers(), "sites response received");
    let (status, body) = read_body(response).await?;
    debug!(%body, "sites response body");

    if !status.is_success() {
      return Err(ProxyError::backend_status(status.as_u16(), &body));
    }

    let data: Value = serde_json::from_str(&body).map_err(|_| ProxyError::malformed_body(&body))?;

    if !data.get("sites").is_some_and(Value::is_array) {
      return Err(ProxyError::InvalidFormat);
    }

    Ok(data)
  }

  /// Fetch and deserialize every known site
  pub async fn list_sites(&self) -> Result<Vec<Site>, ProxyError> {
    let raw = self.list_sites_raw().await?;
    let response: SitesResponse = serde_json::from_value(raw).map_err(|e| {
      warn!("Sites response did not match the expected shape: {e}");
      ProxyError::InvalidFormat
    })?;
    Ok(response.sites)
  }

  /// Submit a new site. The enhanced description is returned when the backend supplies it.
  pub async fn submit_site(&self, payload: &Value) -> Result<Option<SubmissionResult>, ProxyError> {
    let url = self.base_url.endpoint(SUBMIT_PATH);
    debug!(%url, "submitting new site");

    let response = self.client.post(&url).json(payload).send().await?;
    let (status, body) = read_body(response).await?;

    if !status.is_success() {
      return Err(ProxyError::backend_status(status.as_u16(), &body));
    }

    Ok(serde_json::from_str::<SubmissionResult>(&body).ok())
  }
}

async fn read_body(response: Response) -> Result<(reqwest::StatusCode, String), ProxyError> {
  let status = response.status();
  let body = response.text().await?;
  Ok((status, body))
}
