//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use domain::{GeocodingProvider, RoutingProvider};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Whether distances can be computed
    pub ready: bool,
    /// Geocoding chain in fallback order
    pub geocoders: Vec<GeocodingProvider>,
    /// Routing chain in fallback order
    pub routers: Vec<RoutingProvider>,
    /// Whether live-fare enrichment and web search are available
    pub search_enrichment: bool,
    /// Configured search provider
    pub search_provider: Option<String>,
}

/// Readiness check - which provider chains and enrichments are configured?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let capabilities = state.tools.capabilities();
    let ready = capabilities.can_route();
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            search_enrichment: capabilities.web_search.is_some(),
            search_provider: capabilities.web_search,
            geocoders: capabilities.geocoders,
            routers: capabilities.routers,
        }),
    )
}
