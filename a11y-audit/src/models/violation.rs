//! Violation records before and after enrichment

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Violation exactly as the scanner reported it; shape is not under our control
pub type RawViolation = Value;

/// Canonical violation produced by the enricher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedViolation {
    /// Rule identifier, or `violation-<index>` when the source has none
    pub id: String,
    /// Human-readable description (may be empty)
    pub description: String,
    /// Lowercase impact from the known vocabulary
    pub impact: String,
    /// Opaque page location records
    pub nodes: Vec<Value>,
    /// Source tags that reference WCAG, in source order
    pub wcag: Vec<String>,
    /// Original record, kept for traceability
    pub raw: RawViolation,
}

impl EnrichedViolation {
    /// Minimal record for a source item that could not be normalized
    pub fn minimal(index: usize, raw: RawViolation) -> Self {
        Self {
            id: positional_id(index),
            description: String::new(),
            impact: super::DEFAULT_IMPACT.to_string(),
            nodes: Vec::new(),
            wcag: Vec::new(),
            raw,
        }
    }
}

/// Identifier used when the source record carries none
pub fn positional_id(index: usize) -> String {
    format!("violation-{}", index)
}

/// Prioritized violation after the AI annotation stage
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedViolation {
    pub violation: EnrichedViolation,
    pub explanation: super::BestEffort<String>,
}
