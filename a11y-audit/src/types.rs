//! Collaborator traits for the audit pipeline
//!
//! The pipeline depends on two external collaborators:
//! - **Scanner:** drives a browser against the target and returns raw violations
//! - **Assistant:** optional generative service for explanations, remediation
//!   suggestions and report summaries
//!
//! Both are trait objects so the HTTP clients in `services` can be swapped for
//! in-process fakes in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DetailedIssue, EnrichedViolation, Remediation, ScanResult};

/// Scanner collaborator errors
///
/// Display text is what the error sanitizer matches against, so variants carry
/// the underlying failure text verbatim.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Scan timed out after {0}s")]
    Timeout(u64),

    /// Target could not be reached or rendered (DNS, refused, reset...)
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Scanner service answered with a non-success status
    #[error("Scanner returned {0}: {1}")]
    Rejected(u16, String),

    /// Scanner service itself could not be reached
    #[error("Scanner service unavailable")]
    ServiceUnavailable,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Assistant collaborator errors
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Assistant returned an empty response")]
    EmptyResponse,
}

/// Produces raw violations for a URL
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Scanner name for logging
    fn name(&self) -> &'static str;

    /// Scan a normalized URL
    async fn scan_website(&self, url: &str) -> Result<ScanResult, ScanError>;
}

/// Optional generative enrichment source
///
/// Every call is best-effort: callers treat any error as "unavailable".
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Assistant name for logging
    fn name(&self) -> &'static str;

    /// Plain-language explanation of one violation
    async fn explain(&self, violation: &EnrichedViolation) -> Result<String, AssistantError>;

    /// Structured fix suggestion for one violation
    async fn suggest_remediation(
        &self,
        violation: &EnrichedViolation,
    ) -> Result<Remediation, AssistantError>;

    /// Narrative summary of a whole report
    async fn summarize(
        &self,
        url: &str,
        issues: &[DetailedIssue],
    ) -> Result<String, AssistantError>;
}
