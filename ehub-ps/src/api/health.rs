//! Liveness endpoints

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Root status response
#[derive(Debug, Serialize)]
pub struct RootStatus {
    pub message: String,
    pub status: String,
}

/// GET /
pub async fn root_status() -> Json<RootStatus> {
    Json(RootStatus {
        message: "EthioML Hub Unified API is online".to_string(),
        status: "online".to_string(),
    })
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub git_hash: String,
    pub model_state: String,
    /// Active scorer, absent when predictions are degraded
    pub scorer: Option<String>,
    pub uptime_seconds: i64,
}

/// GET /health
///
/// Reports `ok` whatever the model state; `model_state` tells callers
/// whether predictions are real.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "ehub-ps".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        model_state: state.model.state().to_string(),
        scorer: state.model.scorer().map(|s| s.kind().to_string()),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
