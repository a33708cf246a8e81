//! Audit endpoint
//!
//! POST /api/audit - admission-gated; runs the full pipeline for one URL

use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::post,
    Json, Router,
};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{AuditRequest, AuditResponse};
use crate::services::normalize_target_url;
use crate::workflow::assemble_response;
use crate::AppState;

/// POST /api/audit
///
/// Body: `{"url": "example.com", "options": {...}}`. The URL is normalized
/// before the scan; `options` is accepted and ignored.
pub async fn run_audit(
    State(state): State<AppState>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> ApiResult<Json<AuditResponse>> {
    let started = Instant::now();
    let request_id = Uuid::new_v4();

    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let url = normalize_target_url(request.url.as_deref())?;

    info!(%request_id, url = %url, "Audit started");

    let outcome = match state.pipeline.run(&url, request_id).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let kind = e.failure_kind();
            *state.last_error.write().await =
                Some(format!("{}: {}", kind.code(), kind.user_message()));
            return Err(ApiError::AuditFailed {
                request_id,
                kind,
                detail: e.to_string(),
            });
        }
    };

    let response = assemble_response(request_id, outcome, started.elapsed());

    info!(
        %request_id,
        score = response.audit_report.accessibility_score,
        issues = response.audit_report.detailed_issues.len(),
        duration_ms = response.performance.total_duration,
        "Audit complete"
    );

    Ok(Json(response))
}

/// Build audit routes with the admission gate applied
pub fn audit_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/audit", post(run_audit))
        .route_layer(middleware::from_fn_with_state(
            state,
            super::admission_middleware,
        ))
}
