//! HTTP client for the recommendation backend

pub mod client;

pub use client::{BackendClient, SEARCH_PATH, SITES_PATH, SUBMIT_PATH};
