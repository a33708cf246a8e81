//! Scanner output

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RawViolation;

/// Result of one website scan; any missing field decodes as empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanResult {
    #[serde(deserialize_with = "null_as_empty")]
    pub violations: Vec<RawViolation>,
    #[serde(deserialize_with = "null_as_empty")]
    pub passes: Vec<Value>,
    #[serde(deserialize_with = "null_as_empty")]
    pub incomplete: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
