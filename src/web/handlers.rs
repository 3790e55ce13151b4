//! Request handlers for all API endpoints

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, warn};

use super::models::*;
use super::AppState;
use crate::error::SupplyError;
use crate::supply::compute_supply_snapshot;

/// Client/CDN cache lifetime for supply responses, in seconds.
const CACHE_TIME_SECS: u64 = 1800;

// ============================================================================
// Health Check
// ============================================================================

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

// ============================================================================
// Circulating Supply
// ============================================================================

/// Base CORS headers attached to every supply-endpoint response.
fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Origin, X-Requested-With, Content-Type, Accept, Authorization"),
    );
    headers
}

/// CORS pre-flight for the supply endpoint.
pub async fn token_balances_preflight() -> Response {
    let mut headers = cors_headers();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("PUT, POST, PATCH, DELETE, GET"),
    );

    (StatusCode::OK, headers, Json(json!({}))).into_response()
}

pub async fn token_balances(
    State(state): State<AppState>,
    Query(query): Query<SupplyQuery>,
) -> Response {
    let mut headers = cors_headers();
    let api_key = query.alchemy_api.unwrap_or_default();

    match compute_supply_snapshot(&state.config, &api_key).await {
        Ok(snapshot) => {
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_str(&format!(
                    "s-maxage={}, stale-while-revalidate={}",
                    CACHE_TIME_SECS,
                    2 * CACHE_TIME_SECS
                ))
                .expect("valid Cache-Control header"),
            );

            (
                StatusCode::OK,
                headers,
                Json(SupplyResponse {
                    success: true,
                    status_code: 200,
                    results: snapshot.into(),
                }),
            )
                .into_response()
        }
        Err(error @ SupplyError::MissingCredential) => {
            // Missing key keeps the framework-default status; the body
            // carries the real code.
            warn!("Supply request rejected: no alchemyApi key supplied");
            (
                StatusCode::OK,
                headers,
                Json(FailureResponse {
                    success: false,
                    status_code: 500,
                    message: error.to_string(),
                }),
            )
                .into_response()
        }
        Err(error) => {
            error!("Supply aggregation failed: {}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                headers,
                Json(FailureResponse {
                    success: false,
                    status_code: 500,
                    message: error.to_string(),
                }),
            )
                .into_response()
        }
    }
}
