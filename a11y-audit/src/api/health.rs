//! Health check endpoint
//!
//! Exempt from admission so monitors never consume a client's window.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    /// Module name ("a11y-audit")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// Clients currently holding an admission window
    pub tracked_clients: usize,
    /// Whether AI enrichment is configured
    pub assistant_enabled: bool,
    /// Last sanitized audit failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let last_error = state.last_error.read().await.clone();

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "a11y-audit".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        tracked_clients: state.admission.tracked_clients(),
        assistant_enabled: state.pipeline.assistant_enabled(),
        last_error,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
