//! a11y-audit library interface
//!
//! Exposes the audit pipeline, admission controller and HTTP router for the
//! binary and for integration testing.

pub mod admission;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod types;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::admission::AdmissionController;
use crate::config::AuditConfig;
use crate::services::{HttpAssistant, HttpScanner};
use crate::types::Assistant;
use crate::workflow::AuditPipeline;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-client admission windows; the only state shared between requests
    pub admission: Arc<AdmissionController>,
    /// Scanner, optional assistant and pipeline settings
    pub pipeline: Arc<AuditPipeline>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last sanitized failure, for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(admission: Arc<AdmissionController>, pipeline: Arc<AuditPipeline>) -> Self {
        Self {
            admission,
            pipeline,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Wire up the HTTP collaborators described by `config`
    pub fn from_config(config: &AuditConfig) -> anyhow::Result<Self> {
        let scanner = HttpScanner::new(config.scanner.endpoint.clone(), config.scan_timeout())?;

        let assistant: Option<Arc<dyn Assistant>> = match config.assistant_settings() {
            Some(settings) => {
                let client = HttpAssistant::new(settings)?;
                tracing::info!(model = client.model(), "AI assistant enabled");
                Some(Arc::new(client))
            }
            None => {
                tracing::info!("No assistant API key configured - AI enrichment disabled");
                None
            }
        };

        let pipeline = AuditPipeline::new(
            Arc::new(scanner),
            assistant,
            config.scan_timeout(),
            config.annotation.limit,
        );
        let admission = AdmissionController::new(config.admission_policy());

        Ok(Self::new(Arc::new(admission), Arc::new(pipeline)))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::audit_routes(state.clone()))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
