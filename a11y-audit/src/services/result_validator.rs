//! Result Validator and Sanity Check
//!
//! Both checks read the serialized report rather than the typed model, so a
//! report that was corrupted on its way through (missing or non-numeric score,
//! missing issue list) is still caught.
//!
//! # Validation score
//! `validation_score = clamp(0, 100, accessibility_score - floor(issue_count / 2))`
//!
//! The extra volume penalty is decoupled from the builder's score so a report
//! full of low-impact issues lands in a lower quality band.
//!
//! # Quality bands
//! - good: score ≥ 80
//! - fair: score ≥ 50
//! - poor: otherwise

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{AuditReport, IssueRef, Quality, SanityCheck, ValidationResult};

const SCORE_FIELD: &str = "accessibilityScore";
const ISSUES_FIELD: &str = "detailedIssues";

/// Validate a typed report
pub fn validate(report: &AuditReport) -> ValidationResult {
    match serde_json::to_value(report) {
        Ok(value) => validate_value(&value),
        Err(e) => ValidationResult {
            overall_quality: Quality::Poor,
            validation_score: 0,
            issues: Vec::new(),
            warnings: vec![format!("Report could not be serialized: {}", e)],
        },
    }
}

/// Validate a serialized report
pub fn validate_value(report: &Value) -> ValidationResult {
    let mut warnings = Vec::new();

    let base_score = match report.get(SCORE_FIELD) {
        None => {
            warnings.push("Accessibility score is missing".to_string());
            0
        }
        Some(value) => match value.as_f64() {
            Some(score) => score.round().clamp(0.0, 100.0) as i64,
            None => {
                warnings.push(format!("Accessibility score is not numeric: {}", value));
                0
            }
        },
    };

    let issues: Vec<IssueRef> = match report.get(ISSUES_FIELD).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .map(|item| IssueRef {
                id: string_field(item, "id").unwrap_or_else(|| "unknown".to_string()),
                impact: string_field(item, "impact").unwrap_or_else(|| "unknown".to_string()),
            })
            .collect(),
        None => {
            warnings.push("Detailed issue list is missing".to_string());
            Vec::new()
        }
    };

    let volume_penalty = (issues.len() / 2) as i64;
    let validation_score = (base_score - volume_penalty).clamp(0, 100) as u32;
    let overall_quality = Quality::from_score(validation_score);

    if !warnings.is_empty() {
        warn!(?warnings, "Report validation produced warnings");
    }
    debug!(validation_score, ?overall_quality, "Report validated");

    ValidationResult {
        overall_quality,
        validation_score,
        issues,
        warnings,
    }
}

/// Sanity-check a typed report
pub fn sanity_check(report: &AuditReport) -> SanityCheck {
    match serde_json::to_value(report) {
        Ok(value) => sanity_check_value(&value),
        Err(e) => SanityCheck {
            passed: false,
            notes: vec![format!("Report could not be serialized: {}", e)],
        },
    }
}

/// Passes iff the score is present, numeric and within [0, 100]
pub fn sanity_check_value(report: &Value) -> SanityCheck {
    let mut notes = Vec::new();

    match report.get(SCORE_FIELD) {
        None => notes.push("Accessibility score is missing".to_string()),
        Some(value) => match value.as_f64() {
            None => notes.push(format!("Accessibility score is not numeric: {}", value)),
            Some(score) if !(0.0..=100.0).contains(&score) => {
                notes.push(format!("Accessibility score {} is outside [0, 100]", score))
            }
            Some(_) => {}
        },
    }

    SanityCheck {
        passed: notes.is_empty(),
        notes,
    }
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_with(score: Value, issue_count: usize) -> Value {
        let issues: Vec<Value> = (0..issue_count)
            .map(|i| json!({"id": format!("rule-{}", i), "impact": "minor"}))
            .collect();
        json!({ "url": "https://example.com", "accessibilityScore": score, "detailedIssues": issues })
    }

    #[test]
    fn test_volume_penalty() {
        // 3 issues -> builder score 76, penalty 1
        let result = validate_value(&report_with(json!(76), 3));
        assert_eq!(result.validation_score, 75);
        assert_eq!(result.overall_quality, Quality::Fair);
        assert_eq!(result.issues.len(), 3);
        assert_eq!(result.issues[0], IssueRef { id: "rule-0".into(), impact: "minor".into() });
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_report_is_good() {
        let result = validate_value(&report_with(json!(100), 0));
        assert_eq!(result.validation_score, 100);
        assert_eq!(result.overall_quality, Quality::Good);
    }

    #[test]
    fn test_many_issues_is_poor_and_clamped() {
        let result = validate_value(&report_with(json!(0), 20));
        assert_eq!(result.validation_score, 0);
        assert_eq!(result.overall_quality, Quality::Poor);
    }

    #[test]
    fn test_missing_score_warns() {
        let result = validate_value(&json!({ "detailedIssues": [] }));
        assert_eq!(result.validation_score, 0);
        assert_eq!(result.warnings, vec!["Accessibility score is missing".to_string()]);
    }

    #[test]
    fn test_non_numeric_score_warns() {
        let result = validate_value(&report_with(json!("ninety"), 0));
        assert_eq!(result.validation_score, 0);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("not numeric"));
    }

    #[test]
    fn test_sanity_passes_in_range() {
        assert!(sanity_check_value(&report_with(json!(0), 0)).passed);
        assert!(sanity_check_value(&report_with(json!(100), 0)).passed);
    }

    #[test]
    fn test_sanity_fails_out_of_range_or_missing() {
        let over = sanity_check_value(&report_with(json!(101), 0));
        assert!(!over.passed);
        assert_eq!(over.notes.len(), 1);

        assert!(!sanity_check_value(&report_with(json!(-1), 0)).passed);
        assert!(!sanity_check_value(&report_with(json!(null), 0)).passed);
        assert!(!sanity_check_value(&json!({})).passed);
    }
}
