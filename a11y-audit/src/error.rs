//! Error types for a11y-audit
//!
//! Only admission rejections, invalid input and scan failures reach the
//! client. Best-effort degradations never become an `ApiError`.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::services::{FailureKind, UrlError};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client exceeded its admission window (429)
    #[error("Rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    /// Missing or empty URL (400)
    #[error("Missing URL")]
    MissingUrl,

    /// URL failed to parse (400)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Malformed request body (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Scan could not complete (500); `detail` is logged, never returned
    #[error("Audit {request_id} failed: {detail}")]
    AuditFailed {
        request_id: Uuid,
        kind: FailureKind,
        detail: String,
    },
}

impl From<UrlError> for ApiError {
    fn from(err: UrlError) -> Self {
        match err {
            UrlError::Missing => ApiError::MissingUrl,
            UrlError::Invalid(reason) => ApiError::InvalidUrl(reason),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::MissingUrl | ApiError::InvalidUrl(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::AuditFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::RateLimited { .. } => "RATE_LIMITED",
            ApiError::MissingUrl => "MISSING_URL",
            ApiError::InvalidUrl(_) => "INVALID_URL",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::AuditFailed { kind, .. } => kind.code(),
        }
    }

    /// Message safe to show the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::RateLimited { retry_after_seconds } => format!(
                "Too many audit requests. Please wait {} second(s) and try again.",
                retry_after_seconds
            ),
            ApiError::MissingUrl => "Please provide a website URL to audit.".to_string(),
            ApiError::InvalidUrl(_) => {
                "The URL is not valid. Please enter an address like https://example.com."
                    .to_string()
            }
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::AuditFailed { kind, .. } => kind.user_message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut body = json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.user_message(),
            }
        });

        match &self {
            ApiError::RateLimited { retry_after_seconds } => {
                body["retryAfterSeconds"] = json!(retry_after_seconds);
                let mut response = (status, Json(body)).into_response();
                response.headers_mut().insert(
                    header::RETRY_AFTER,
                    HeaderValue::from(*retry_after_seconds),
                );
                response
            }
            ApiError::AuditFailed { request_id, .. } => {
                body["requestId"] = json!(request_id);
                (status, Json(body)).into_response()
            }
            _ => (status, Json(body)).into_response(),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
