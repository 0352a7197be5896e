//! Route definitions

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Tool API (v1)
        .route("/v1/tools", get(handlers::tools::list_tools))
        .route("/v1/tools/invoke", post(handlers::tools::invoke_tool))
        .route("/v1/tools/{tool}/text", post(handlers::tools::invoke_tool_text))
        // Trip API (v1)
        .route("/v1/trips/plan", post(handlers::trips::plan_trip))
        .with_state(state)
}

/// CORS policy from configuration: empty origin list allows any origin
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    }
}

/// Router plus the middleware stack the server runs with
pub fn create_app(state: AppState) -> Router {
    let config = state.config.server.clone();
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(config.max_body_size_json_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(TraceLayer::new_for_http());

    if config.cors_enabled {
        app.layer(cors_layer(&config))
    } else {
        app
    }
}
