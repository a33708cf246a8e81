//! Audit pipeline
//!
//! Stage order for one request:
//! 1. Scan (bounded by the scan timeout; the only fatal stage)
//! 2. Enrich
//! 3. Prioritize ∥ build report from the enriched list
//! 4. Annotate the prioritized list ∥ validate, sanity-check and compare the report
//!
//! Report building and annotation are awaited together; neither depends on
//! the other. Everything after the scan degrades instead of failing.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    AnnotatedViolation, AuditReport, IndustryComparison, SanityCheck, ScanResult,
    ValidationResult,
};
use crate::services::{
    annotate, compare, enrich, prioritize, sanity_check, validate, FailureKind, ReportBuilder,
};
use crate::types::{Assistant, ScanError, Scanner};

/// Request-fatal pipeline failures
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl PipelineError {
    /// Sanitized failure class for the client-facing message
    pub fn failure_kind(&self) -> FailureKind {
        FailureKind::classify(&self.to_string())
    }
}

/// Everything the response is assembled from
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub report: AuditReport,
    /// Prioritized violations with best-effort explanations
    pub prioritized: Vec<AnnotatedViolation>,
    pub validation: ValidationResult,
    pub sanity: SanityCheck,
    pub comparison: IndustryComparison,
}

/// Scanner plus optional assistant, shared by all requests
pub struct AuditPipeline {
    scanner: Arc<dyn Scanner>,
    assistant: Option<Arc<dyn Assistant>>,
    scan_timeout: Duration,
    annotation_limit: usize,
}

impl AuditPipeline {
    pub fn new(
        scanner: Arc<dyn Scanner>,
        assistant: Option<Arc<dyn Assistant>>,
        scan_timeout: Duration,
        annotation_limit: usize,
    ) -> Self {
        Self {
            scanner,
            assistant,
            scan_timeout,
            annotation_limit,
        }
    }

    pub fn assistant_enabled(&self) -> bool {
        self.assistant.is_some()
    }

    /// Run the full pipeline for an already normalized URL
    pub async fn run(&self, url: &str, request_id: Uuid) -> Result<AuditOutcome, PipelineError> {
        let scan = self.scan(url).await?;
        info!(
            %request_id,
            url,
            scanner = self.scanner.name(),
            violations = scan.violations.len(),
            "Scan finished"
        );

        let enriched = enrich(&scan.violations);
        let prioritized = prioritize(&enriched);

        let assistant = self.assistant.as_deref();
        let builder = ReportBuilder::new(assistant);
        let (report, annotated) = tokio::join!(
            builder.build(url, &enriched, request_id),
            annotate(prioritized, assistant, self.annotation_limit),
        );

        let validation = validate(&report);
        let sanity = sanity_check(&report);
        if !sanity.passed {
            warn!(%request_id, notes = ?sanity.notes, "Report failed sanity check");
        }
        let comparison = compare(&report);

        info!(
            %request_id,
            score = report.accessibility_score,
            validation_score = validation.validation_score,
            quality = ?validation.overall_quality,
            "Audit report built"
        );

        Ok(AuditOutcome {
            report,
            prioritized: annotated,
            validation,
            sanity,
            comparison,
        })
    }

    async fn scan(&self, url: &str) -> Result<ScanResult, ScanError> {
        match tokio::time::timeout(self.scan_timeout, self.scanner.scan_website(url)).await {
            Ok(result) => result,
            Err(_) => Err(ScanError::Timeout(self.scan_timeout.as_secs())),
        }
    }
}
