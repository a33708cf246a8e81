//! Second-pass validation results

use serde::Serialize;

/// Quality band derived from the validation score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Good,
    Fair,
    Poor,
}

impl Quality {
    /// good ≥ 80, fair ≥ 50, poor otherwise
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Quality::Good
        } else if score >= 50 {
            Quality::Fair
        } else {
            Quality::Poor
        }
    }
}

/// Issue identity as seen by the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRef {
    pub id: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub overall_quality: Quality,
    pub validation_score: u32,
    pub issues: Vec<IssueRef>,
    pub warnings: Vec<String>,
}

/// Last structural gate before responding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanityCheck {
    pub passed: bool,
    pub notes: Vec<String>,
}
