//! Axum router configuration for all endpoints

use axum::{
  middleware,
  routing::{get, post},
  Router,
};

use crate::server::handlers::{pages, search, sites, status, submit};
use crate::server::middleware::request_context_middleware;
use crate::server::state::AppState;

/// Create the application router around the given state
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Pages
    .route("/", get(pages::search_page))
    .route("/destinations", get(pages::destinations_page))
    .route("/site/{id}", get(pages::site_page))
    .route("/submit", get(pages::submit_page).post(pages::submit_form))
    // Proxy routes
    .route("/api/search", post(search::search))
    .route("/api/sites", get(sites::list_sites))
    .route("/api/submit-site", post(submit::submit_site))
    // Service endpoints
    .route("/status", get(status::status))
    .route("/version", get(status::version))
    .layer(middleware::from_fn(request_context_middleware))
    .with_state(state)
}
