//! Remediation Prioritizer
//!
//! Orders enriched violations by descending severity weight. The sort is
//! stable: ties keep their input order, which decides which issues fall inside
//! the AI annotation limit.

use std::cmp::Reverse;

use crate::models::{severity_weight, EnrichedViolation};

/// Stable sort by descending severity weight
pub fn prioritize(enriched: &[EnrichedViolation]) -> Vec<EnrichedViolation> {
    let mut prioritized = enriched.to_vec();
    // slice::sort_by_key is stable
    prioritized.sort_by_key(|v| Reverse(severity_weight(&v.impact)));
    prioritized
}
