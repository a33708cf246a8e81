//! Response assembly

use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

use crate::models::{AnnotatedViolation, AuditReport, AuditResponse, Performance, ValidationSummary};
use crate::workflow::AuditOutcome;

/// Copy available AI explanations onto `detailed_issues`
///
/// Joined by issue identity (id, impact and raw record), not by position, so
/// the prioritized order of `annotated` cannot misattribute an explanation.
/// Each report issue is claimed at most once, which keeps exact duplicates 1:1.
/// Returns the number of explanations merged.
pub fn merge_explanations(report: &mut AuditReport, annotated: &[AnnotatedViolation]) -> usize {
    let mut claimed = vec![false; report.detailed_issues.len()];
    let mut merged = 0;

    for item in annotated {
        let position = report
            .detailed_issues
            .iter()
            .enumerate()
            .position(|(index, issue)| {
                !claimed[index]
                    && issue.id == item.violation.id
                    && issue.impact == item.violation.impact
                    && issue.raw == item.violation.raw
            });

        let Some(position) = position else {
            tracing::warn!(issue = %item.violation.id, "Annotated violation has no matching report issue");
            continue;
        };
        claimed[position] = true;

        if let Some(text) = item.explanation.as_option() {
            report.detailed_issues[position].ai_explanation = Some(text.clone());
            merged += 1;
        }
    }

    merged
}

/// Build the success response for a finished audit
pub fn assemble_response(
    request_id: Uuid,
    mut outcome: AuditOutcome,
    elapsed: Duration,
) -> AuditResponse {
    let merged = merge_explanations(&mut outcome.report, &outcome.prioritized);
    tracing::debug!(%request_id, merged, "AI explanations merged");

    AuditResponse {
        request_id,
        success: true,
        validation: ValidationSummary {
            quality: outcome.validation.overall_quality,
            score: outcome.validation.validation_score,
            sanity_check: outcome.sanity,
            issues: outcome.validation.issues,
            warnings: outcome.validation.warnings,
        },
        audit_report: outcome.report,
        industry_comparison: outcome.comparison,
        performance: Performance {
            total_duration: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        },
        timestamp: Utc::now(),
    }
}
