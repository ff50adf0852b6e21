//! Health, status and navigator handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tvnav_navigator::DebugSnapshot;

use crate::state::AppState;

/// Health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
}

/// Reachability state reported by `GET /api/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Online,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: ServiceStatus,
    pub service: String,
    /// RFC 3339 UTC with millisecond precision.
    pub timestamp: String,
}

/// Health check handler.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        service: state.service.name.clone(),
        version: state.service.version.clone(),
    })
}

/// Status handler; the timestamp is taken per request.
pub async fn api_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: ServiceStatus::Online,
        service: state.service.short_name.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Latest navigator debug snapshot, 404 when no navigator is attached.
pub async fn navigator_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DebugSnapshot>, StatusCode> {
    state
        .navigator_snapshot()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
