//! Violation Enricher
//!
//! Normalizes heterogeneous raw violation records into [`EnrichedViolation`].
//!
//! # Fallback table
//! Each canonical field is read from the first source key holding a non-empty
//! value, in this order:
//!
//! | Field         | Source keys                          | Default               |
//! |---------------|--------------------------------------|-----------------------|
//! | `id`          | `id`, `ruleId`                       | `violation-<index>`   |
//! | `description` | `description`, `help`, `message`     | `""`                  |
//! | `impact`      | `impact`, `severity`                 | `"moderate"`          |
//! | `nodes`       | `nodes`, `targets`                   | `[]`                  |
//! | `wcag`        | `tags` filtered by `^wcag` (any case)| `[]`                  |
//!
//! Enrichment is total. A record that cannot be adapted degrades to the
//! minimal `{id, raw}` record and the batch continues.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::models::violation::positional_id;
use crate::models::{normalize_impact, EnrichedViolation, RawViolation};

const ID_KEYS: [&str; 2] = ["id", "ruleId"];
const DESCRIPTION_KEYS: [&str; 3] = ["description", "help", "message"];
const IMPACT_KEYS: [&str; 2] = ["impact", "severity"];
const NODE_KEYS: [&str; 2] = ["nodes", "targets"];
const TAGS_KEY: &str = "tags";

static WCAG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^wcag").expect("valid regex"));

/// Per-record adaptation failure; always recovered locally
#[derive(Debug, Error)]
pub enum AdaptError {
    #[error("violation record is {0}, not an object")]
    NotAnObject(&'static str),
}

/// Enrich a batch of raw violations; output length always equals input length
pub fn enrich(raw_violations: &[RawViolation]) -> Vec<EnrichedViolation> {
    raw_violations
        .iter()
        .enumerate()
        .map(|(index, raw)| match adapt_violation(index, raw) {
            Ok(enriched) => enriched,
            Err(e) => {
                warn!(index, error = %e, "Degrading malformed violation to minimal record");
                EnrichedViolation::minimal(index, raw.clone())
            }
        })
        .collect()
}

/// Adapt one raw record through the fallback table
pub fn adapt_violation(index: usize, raw: &RawViolation) -> Result<EnrichedViolation, AdaptError> {
    let record = raw
        .as_object()
        .ok_or_else(|| AdaptError::NotAnObject(json_kind(raw)))?;

    let id = first_identifier(record).unwrap_or_else(|| positional_id(index));
    let description = first_string(record, &DESCRIPTION_KEYS)
        .unwrap_or_default()
        .to_string();
    let impact = normalize_impact(first_string(record, &IMPACT_KEYS));
    let nodes = first_array(record, &NODE_KEYS).cloned().unwrap_or_default();
    let wcag = extract_wcag_tags(record.get(TAGS_KEY));

    Ok(EnrichedViolation {
        id,
        description,
        impact,
        nodes,
        wcag,
        raw: raw.clone(),
    })
}

/// Tags matching the WCAG prefix, in source order; other tags are dropped
pub fn extract_wcag_tags(tags: Option<&Value>) -> Vec<String> {
    tags.and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .filter(|tag| WCAG_TAG.is_match(tag))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Identifiers may arrive as strings or numbers
fn first_identifier(record: &Map<String, Value>) -> Option<String> {
    ID_KEYS.iter().find_map(|key| match record.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn first_string<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

fn first_array<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_array))
        .find(|a| !a.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_axe_style_record() {
        let raw = json!({
            "id": "image-alt",
            "description": "Ensures <img> elements have alternate text",
            "help": "Images must have alternate text",
            "impact": "critical",
            "tags": ["cat.text-alternatives", "wcag2a", "WCAG111", "section508"],
            "nodes": [{"target": ["img.hero"]}]
        });

        let enriched = adapt_violation(0, &raw).unwrap();
        assert_eq!(enriched.id, "image-alt");
        assert_eq!(enriched.description, "Ensures <img> elements have alternate text");
        assert_eq!(enriched.impact, "critical");
        assert_eq!(enriched.wcag, vec!["wcag2a", "WCAG111"]);
        assert_eq!(enriched.nodes.len(), 1);
        assert_eq!(enriched.raw, raw);
    }

    #[test]
    fn test_alternate_field_names() {
        let raw = json!({
            "ruleId": "color-contrast",
            "message": "Insufficient contrast",
            "severity": "Serious",
            "targets": ["#nav a"]
        });

        let enriched = adapt_violation(3, &raw).unwrap();
        assert_eq!(enriched.id, "color-contrast");
        assert_eq!(enriched.description, "Insufficient contrast");
        assert_eq!(enriched.impact, "serious");
        assert_eq!(enriched.nodes, vec![json!("#nav a")]);
        assert!(enriched.wcag.is_empty());
    }

    #[test]
    fn test_empty_values_fall_through() {
        let raw = json!({
            "id": "  ",
            "ruleId": "label",
            "description": "",
            "help": "Form elements must have labels",
            "nodes": [],
            "targets": ["input#email"]
        });

        let enriched = adapt_violation(0, &raw).unwrap();
        assert_eq!(enriched.id, "label");
        assert_eq!(enriched.description, "Form elements must have labels");
        assert_eq!(enriched.nodes.len(), 1);
    }

    #[test]
    fn test_empty_object_gets_defaults() {
        let enriched = adapt_violation(7, &json!({})).unwrap();
        assert_eq!(enriched.id, "violation-7");
        assert_eq!(enriched.description, "");
        assert_eq!(enriched.impact, "moderate");
        assert!(enriched.nodes.is_empty());
    }

    #[test]
    fn test_unknown_impact_defaults_to_moderate() {
        let enriched = adapt_violation(0, &json!({"impact": "apocalyptic"})).unwrap();
        assert_eq!(enriched.impact, "moderate");
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let enriched = adapt_violation(0, &json!({"id": 42})).unwrap();
        assert_eq!(enriched.id, "42");
    }

    #[test]
    fn test_non_object_degrades_without_aborting_batch() {
        let batch = vec![json!("garbage"), json!({"id": "region"}), Value::Null, json!(12)];
        let enriched = enrich(&batch);

        assert_eq!(enriched.len(), 4);
        assert_eq!(enriched[0].id, "violation-0");
        assert_eq!(enriched[0].raw, json!("garbage"));
        assert_eq!(enriched[1].id, "region");
        assert_eq!(enriched[2].id, "violation-2");
        assert_eq!(enriched[3].id, "violation-3");
        assert!(enriched.iter().all(|v| !v.id.is_empty()));
    }

    #[test]
    fn test_empty_batch() {
        assert!(enrich(&[]).is_empty());
    }

    #[test]
    fn test_non_string_tags_are_ignored() {
        let tags = json!(["wcag21aa", 5, null, "best-practice", "Wcag412"]);
        assert_eq!(extract_wcag_tags(Some(&tags)), vec!["wcag21aa", "Wcag412"]);
        assert!(extract_wcag_tags(Some(&json!("wcag2a"))).is_empty());
        assert!(extract_wcag_tags(None).is_empty());
    }
}
