//! API route definitions

use axum::{routing::get, Router};

use super::handlers;
use super::AppState;

/// Create all API routes
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))
        // Circulating supply
        .route(
            "/api/token-balances",
            get(handlers::token_balances).options(handlers::token_balances_preflight),
        )
        // Add state to all routes
        .with_state(state)
}
