//! Health, readiness and status handlers

use axum::{Json, extract::State, http::StatusCode};
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
    pub ready: bool,
    pub translation: ServiceStatus,
    pub speech: ServiceStatus,
}

/// Status of a capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub healthy: bool,
}

/// Readiness check - can both capabilities serve requests?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let readiness = state.service.readiness().await;

    let ready = readiness.is_ready();
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            translation: ServiceStatus {
                healthy: readiness.translation_available,
            },
            speech: ServiceStatus {
                healthy: readiness.speech_available,
            },
        }),
    )
}

/// Status probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub alive: bool,
    pub sessions: usize,
    pub translation_available: bool,
    pub speech_available: bool,
    pub uptime_secs: u64,
    pub version: String,
}

/// Status probe - liveness, active sessions and capability availability
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let (report, readiness) = tokio::join!(state.service.status(), state.service.readiness());

    Json(StatusResponse {
        alive: report.alive,
        sessions: report.sessions,
        translation_available: readiness.translation_available,
        speech_available: readiness.speech_available,
        uptime_secs: report.uptime.as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
