//! Audit endpoint request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{AuditReport, IndustryComparison, IssueRef, Quality, SanityCheck};

/// POST /api/audit request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditRequest {
    #[serde(default)]
    pub url: Option<String>,
    /// Reserved; accepted and ignored
    #[serde(default)]
    pub options: Option<Value>,
}

/// Validation block of the audit response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub quality: Quality,
    pub score: u32,
    pub sanity_check: SanityCheck,
    pub issues: Vec<IssueRef>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    /// Wall-clock milliseconds from admission to response assembly
    pub total_duration: u64,
}

/// POST /api/audit response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub request_id: Uuid,
    pub success: bool,
    pub audit_report: AuditReport,
    pub validation: ValidationSummary,
    pub industry_comparison: IndustryComparison,
    pub performance: Performance,
    pub timestamp: DateTime<Utc>,
}
