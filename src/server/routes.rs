//! HTTP route handlers.

use axum::{extract::State, Json};

use crate::types::{HealthResponse, HealthStatus};

use super::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GET /
pub async fn index() -> &'static str {
    "Hello, Weather Music Player!"
}

/// Health check endpoint
///
/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: VERSION.to_string(),
        mood_rules: state.moods.len(),
        uptime_seconds: state.uptime_seconds(),
    })
}
