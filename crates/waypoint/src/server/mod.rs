//! HTTP server: proxy routes, pages and service endpoints
//!
//! Uses axum for routing, tower-http for request tracing and askama for the
//! server-rendered pages.

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod state;
