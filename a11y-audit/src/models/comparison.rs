//! Industry comparison guidance attached to a finished report

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryComparison {
    pub url: String,
    pub recommendations: Vec<String>,
    pub expected_variances: String,
    pub interpretation_guide: String,
}
