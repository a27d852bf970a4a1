//! Waypoint - Destination Recommender frontend
//!
//! Serves the destination search, listing, detail and submission pages and the
//! JSON proxy routes that forward to the recommendation backend. Ranking,
//! description enhancement and storage all live in that backend; this crate
//! only resolves where it is, relays its answers and shapes its failures.

pub mod backend;
pub mod config;
pub mod error;
pub mod pages;
pub mod server;
pub mod types;
