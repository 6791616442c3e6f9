//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    routing::{get, post},
};
use infrastructure::ServerConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/v1/status", get(handlers::health::status))
        // Catalog
        .route("/v1/languages", get(handlers::languages::list_languages))
        // Inbound chat events
        .route("/v1/messages", post(handlers::messages::post_message))
        // Direct gateway access
        .route("/v1/translate", post(handlers::translate::translate))
        .route("/v1/tts", post(handlers::speech::synthesize))
        // Attach state
        .with_state(state)
}

/// Router with the full middleware stack applied
pub fn create_app(state: AppState, server: &ServerConfig) -> Router {
    let app = create_router(state)
        .layer(DefaultBodyLimit::max(server.max_body_size_bytes))
        .layer(RequestBodyLimitLayer::new(server.max_body_size_bytes))
        .layer(TraceLayer::new_for_http());

    let app = if server.cors_enabled {
        app.layer(cors_layer(&server.allowed_origins))
    } else {
        app
    };

    // Outermost, so every log line of the request carries the id
    app.layer(RequestIdLayer::new())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let expose = [HeaderName::from_static("x-request-id")];

    if allowed_origins.is_empty() {
        // Development mode: allow all origins
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(expose);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .expose_headers(expose)
}
