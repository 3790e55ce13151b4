//! Web API module for the supply service.
//!
//! Thin axum plumbing around the supply aggregator: routing, the CORS and
//! cache-header contract, and the response envelopes.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::config::Config;

/// Shared application state for all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}
