//! Wire types shared by the proxy routes, the backend client and the pages

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ProxyError;

// Destinations
// ============

/// A destination as the backend describes it. `name` doubles as the link key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
  pub name: String,

  #[serde(default)]
  pub description: String,

  /// Absent or null when the backend found no photo
  #[serde(default)]
  pub photo_url: Option<String>,

  pub latitude: f64,
  pub longitude: f64,
}

/// A destination ranked against a search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
  #[serde(flatten)]
  pub site: Site,

  /// Match score between 0 and 1
  pub similarity: f64,
}

impl SearchResult {
  /// Similarity as a whole percentage, as shown on result cards
  pub fn match_percent(&self) -> i64 {
    (self.similarity * 100.0).round() as i64
  }
}

// Search
// ======

/// Body of `POST /api/search`, forwarded to the backend as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
  pub query: String,
}

/// Backend answer to a search; `sites` is omitted or null when nothing matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
  #[serde(default, deserialize_with = "null_as_default")]
  pub message: String,

  #[serde(default, deserialize_with = "null_as_default")]
  pub sites: Vec<SearchResult>,
}

/// Read an explicit `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Listing
// =======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitesResponse {
  pub sites: Vec<Site>,
}

// Submission
// ==========

/// A new destination, built from the submit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSiteRequest {
  pub name: String,
  pub description: String,
  pub latitude: f64,
  pub longitude: f64,
}

impl NewSiteRequest {
  /// Check that a raw submission carries every required field.
  ///
  /// `name` and `description` must be non-blank strings and the coordinates must
  /// be numbers. Zero is a valid coordinate.
  pub fn from_payload(payload: &Value) -> Result<Self, ProxyError> {
    let object = payload.as_object().ok_or_else(ProxyError::missing_fields)?;

    let text = |field: &str| {
      object.get(field).and_then(Value::as_str).filter(|value| !value.trim().is_empty())
    };
    let number = |field: &str| object.get(field).and_then(Value::as_f64);

    match (text("name"), text("description"), number("latitude"), number("longitude")) {
      (Some(name), Some(description), Some(latitude), Some(longitude)) => Ok(Self {
        name: name.to_string(),
        description: description.to_string(),
        latitude,
        longitude,
      }),
      _ => Err(ProxyError::missing_fields()),
    }
  }
}

/// What the backend reports after accepting a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
  pub original_description: String,
  pub enhanced_description: String,
}

/// Body of a successful `POST /api/submit-site`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
  pub success: bool,

  /// Present when the backend returned the enhanced description
  #[serde(flatten)]
  pub result: Option<SubmissionResult>,
}

impl SubmitResponse {
  pub fn accepted(result: Option<SubmissionResult>) -> Self {
    Self { success: true, result }
  }
}

// Errors and service status
// =========================

/// Uniform error body returned by every route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details: Option<Value>,
}

/// Response for /status
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
  pub status: String,
  pub backend_url: String,
  pub version: String,
}

/// Response for /version
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
  pub version: String,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ErrorKind;
  use serde_json::json;

  #[test]
  fn test_complete_payload_is_accepted() {
    let payload = json!({
      "name": "Bali",
      "description": "Beaches and temples",
      "latitude": -8.34,
      "longitude": 115.09
    });

    let request = NewSiteRequest::from_payload(&payload).unwrap();
    assert_eq!(request.name, "Bali");
    assert_eq!(request.latitude, -8.34);
  }

  #[test]
  fn test_zero_coordinates_are_valid() {
    let payload = json!({ "name": "Null Island", "description": "Nothing here", "latitude": 0, "longitude": 0.0 });
    let request = NewSiteRequest::from_payload(&payload).unwrap();
    assert_eq!((request.latitude, request.longitude), (0.0, 0.0));
  }

  #[test]
  fn test_each_missing_field_is_rejected() {
    let complete = json!({ "name": "Bali", "description": "Beaches", "latitude": 1.0, "longitude": 2.0 });

    for field in ["name", "description", "latitude", "longitude"] {
      let mut payload = complete.clone();
      payload.as_object_mut().unwrap().remove(field);

      let error = NewSiteRequest::from_payload(&payload).unwrap_err();
      assert_eq!(error.kind(), ErrorKind::Validation, "field {field}");
      assert_eq!(error.to_string(), "Missing required fields");
    }
  }

  #[test]
  fn test_blank_and_mistyped_fields_are_rejected() {
    let payloads = [
      json!({ "name": "  ", "description": "Beaches", "latitude": 1.0, "longitude": 2.0 }),
      json!({ "name": "Bali", "description": "Beaches", "latitude": "1.0", "longitude": 2.0 }),
      json!({ "name": "Bali", "description": null, "latitude": 1.0, "longitude": 2.0 }),
      json!(["Bali"]),
      Value::Null,
    ];

    for payload in payloads {
      assert!(NewSiteRequest::from_payload(&payload).is_err(), "accepted {payload}");
    }
  }

  #[test]
  fn test_search_response_tolerates_missing_sites() {
    let response: SearchResponse =
      serde_json::from_value(json!({ "message": "No matching sites found", "query": "moon" })).unwrap();
    assert_eq!(response.message, "No matching sites found");
    assert!(response.sites.is_empty());
  }

  #[test]
  fn test_search_response_treats_null_as_empty() {
    let response: SearchResponse =
      serde_json::from_value(json!({ "message": "No matching sites found", "sites": null })).unwrap();
    assert_eq!(response.message, "No matching sites found");
    assert!(response.sites.is_empty());

    let response: SearchResponse = serde_json::from_value(json!({ "message": null, "sites": [] })).unwrap();
    assert_eq!(response.message, "");
  }

  #[test]
  fn test_search_result_flattens_site_fields() {
    let result: SearchResult = serde_json::from_value(json!({
      "name": "Bali",
      "description": "Beaches",
      "similarity": 0.924,
      "photo_url": null,
      "latitude": -8.34,
      "longitude": 115.09
    }))
    .unwrap();

    assert_eq!(result.site.name, "Bali");
    assert!(result.site.photo_url.is_none());
    assert_eq!(result.match_percent(), 92);
  }

  #[test]
  fn test_submit_response_shapes() {
    assert_eq!(serde_json::to_value(SubmitResponse::accepted(None)).unwrap(), json!({ "success": true }));

    let enhanced = SubmitResponse::accepted(Some(SubmissionResult {
      original_description: "nice beach".to_string(),
      enhanced_description: "A serene stretch of sand".to_string(),
    }));
    assert_eq!(
      serde_json::to_value(enhanced).unwrap(),
      json!({
        "success": true,
        "original_description": "nice beach",
        "enhanced_description": "A serene stretch of sand"
      })
    );
  }
}
