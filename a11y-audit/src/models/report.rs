//! Audit report model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::BestEffort;

/// Structured fix suggestion for one issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remediation {
    /// One-paragraph description of the fix
    pub suggestion: String,
    /// Ordered steps, possibly empty
    #[serde(default)]
    pub steps: Vec<String>,
}

/// One entry of `detailedIssues`, derived 1:1 from an enriched violation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedIssue {
    pub id: String,
    pub description: String,
    pub impact: String,
    pub wcag: Vec<String>,
    pub nodes: Vec<Value>,
    /// `null` when the remediation collaborator was unavailable
    pub remediation: BestEffort<Remediation>,
    pub raw: Value,
    /// Filled in at response assembly for annotated issues only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_explanation: Option<String>,
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub scanned_at: DateTime<Utc>,
    pub request_id: Uuid,
}

/// Scored audit report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub url: String,
    /// Always within [0, 100]
    pub accessibility_score: u32,
    pub detailed_issues: Vec<DetailedIssue>,
    pub summary: String,
    pub meta: ReportMeta,
}
