#![allow(dead_code)]

use axum::{
  body::{to_bytes, Body},
  http::{header, Request, StatusCode},
  Router,
};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

use waypoint::config::{AppConfig, BackendUrl};
use waypoint::server::{routing::create_router, state::AppState};

/// Address nothing listens on
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:1";

pub fn app(backend_url: &str) -> Router {
  app_with_config(AppConfig::new(BackendUrl::parse(backend_url).unwrap()))
}

pub fn app_with_maps_key(backend_url: &str, key: &str) -> Router {
  app_with_config(AppConfig::new(BackendUrl::parse(backend_url).unwrap()).with_maps_api_key(key))
}

pub fn app_with_timeout(backend_url: &str, timeout: Duration) -> Router {
  app_with_config(AppConfig::new(BackendUrl::parse(backend_url).unwrap()).with_timeout(timeout))
}

/// Start a backend that accepts connections and never answers; returns its base URL
pub async fn silent_backend() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();

  tokio::spawn(async move {
    let mut held = Vec::new();
    while let Ok((stream, _)) = listener.accept().await {
      held.push(stream);
    }
  });

  format!("http://{addr}")
}

fn app_with_config(config: AppConfig) -> Router {
  create_router(AppState::new(config).unwrap())
}

pub fn get(uri: &str) -> Request<Body> {
  Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
  post_raw(uri, "application/json", body.to_string())
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
  post_raw(uri, "application/x-www-form-urlencoded", body.to_string())
}

pub fn post_raw(uri: &str, content_type: &str, body: String) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header(header::CONTENT_TYPE, content_type)
    .body(Body::from(body))
    .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
  let response = app.oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
  let (status, body) = send(app, request).await;
  (status, serde_json::from_str(&body).unwrap())
}
