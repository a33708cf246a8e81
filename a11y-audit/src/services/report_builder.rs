//! Audit Report Builder
//!
//! Aggregates enriched violations into an [`AuditReport`].
//!
//! # Scoring
//! `score = clamp(0, 100, 100 - 8 * violation_count)`. The penalty is flat per
//! violation; severity only affects prioritization, not the score.
//!
//! # Degradation
//! Remediation and summary come from the optional assistant. Without one, or
//! when a call fails, `remediation` is `null` and the summary falls back to a
//! fixed template. Building never fails.

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{
    AuditReport, BestEffort, DetailedIssue, EnrichedViolation, Remediation, ReportMeta,
};
use crate::types::Assistant;

/// Points deducted per violation
pub const PENALTY_PER_VIOLATION: i64 = 8;

/// Score for a violation count, clamped to [0, 100]
pub fn accessibility_score(violation_count: usize) -> u32 {
    let count = i64::try_from(violation_count).unwrap_or(i64::MAX);
    let raw = 100i64.saturating_sub(count.saturating_mul(PENALTY_PER_VIOLATION));
    raw.clamp(0, 100) as u32
}

/// Deterministic summary used when no assistant summary is available
pub fn fallback_summary(issue_count: usize) -> String {
    format!("Found {} accessibility issue(s).", issue_count)
}

/// Builds reports, consulting the assistant when one is configured
pub struct ReportBuilder<'a> {
    assistant: Option<&'a dyn Assistant>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(assistant: Option<&'a dyn Assistant>) -> Self {
        Self { assistant }
    }

    /// Build the report for `url` from the enriched (not prioritized) list
    pub async fn build(
        &self,
        url: &str,
        violations: &[EnrichedViolation],
        request_id: Uuid,
    ) -> AuditReport {
        let remediations = self.remediations(violations).await;

        let detailed_issues: Vec<DetailedIssue> = violations
            .iter()
            .zip(remediations)
            .map(|(violation, remediation)| DetailedIssue {
                id: violation.id.clone(),
                description: violation.description.clone(),
                impact: violation.impact.clone(),
                wcag: violation.wcag.clone(),
                nodes: violation.nodes.clone(),
                remediation,
                raw: violation.raw.clone(),
                ai_explanation: None,
            })
            .collect();

        let summary = self
            .summary(url, &detailed_issues)
            .await
            .unwrap_or_else(|reason| {
                debug!(reason, "Using fallback summary");
                fallback_summary(detailed_issues.len())
            });

        AuditReport {
            url: url.to_string(),
            accessibility_score: accessibility_score(violations.len()),
            detailed_issues,
            summary,
            meta: ReportMeta {
                scanned_at: Utc::now(),
                request_id,
            },
        }
    }

    /// One remediation per violation, in input order
    async fn remediations(
        &self,
        violations: &[EnrichedViolation],
    ) -> Vec<BestEffort<Remediation>> {
        let Some(assistant) = self.assistant else {
            return violations
                .iter()
                .map(|_| BestEffort::unavailable("no assistant configured"))
                .collect();
        };

        // join_all yields results in input order regardless of completion order
        join_all(violations.iter().map(|violation| async move {
            let result = assistant.suggest_remediation(violation).await;
            if let Err(e) = &result {
                warn!(issue = %violation.id, error = %e, "Remediation suggestion unavailable");
            }
            BestEffort::from_result(result)
        }))
        .await
    }

    async fn summary(&self, url: &str, issues: &[DetailedIssue]) -> BestEffort<String> {
        let Some(assistant) = self.assistant else {
            return BestEffort::unavailable("no assistant configured");
        };

        match assistant.summarize(url, issues).await {
            Ok(text) if !text.trim().is_empty() => BestEffort::Available(text),
            Ok(_) => BestEffort::unavailable("empty summary"),
            Err(e) => {
                warn!(url, error = %e, "Summary unavailable");
                BestEffort::unavailable(e.to_string())
            }
        }
    }
}
