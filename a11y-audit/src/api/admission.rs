//! Admission middleware
//!
//! Applied to audit routes only; `/health` is never rate limited.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::info;

use crate::admission::client_id_from_headers;
use crate::error::ApiError;
use crate::AppState;

/// Reject the request with 429 once the client's window is full
pub async fn admission_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client_id = client_id_from_headers(request.headers());
    let decision = state.admission.check(&client_id);

    if !decision.allowed {
        info!(
            client = %client_id,
            retry_after_seconds = decision.retry_after_seconds,
            "Admission rejected"
        );
        return Err(ApiError::RateLimited {
            retry_after_seconds: decision.retry_after_seconds,
        });
    }

    Ok(next.run(request).await)
}
