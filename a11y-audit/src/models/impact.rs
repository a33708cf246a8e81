//! Impact vocabulary and severity weights

/// Impact assigned when the source gives none, or one outside the table
pub const DEFAULT_IMPACT: &str = "moderate";

/// Weight used by prioritization for impacts missing from the table
pub const UNKNOWN_IMPACT_WEIGHT: u8 = 2;

/// Severity weights, highest first
pub const SEVERITY_WEIGHTS: [(&str, u8); 6] = [
    ("critical", 5),
    ("serious", 4),
    ("high", 4),
    ("moderate", 3),
    ("low", 2),
    ("minor", 1),
];

/// Case-insensitive weight lookup
pub fn severity_weight(impact: &str) -> u8 {
    let impact = impact.trim();
    SEVERITY_WEIGHTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(impact))
        .map(|(_, weight)| *weight)
        .unwrap_or(UNKNOWN_IMPACT_WEIGHT)
}

/// Map a source impact onto the known vocabulary (lowercase), defaulting to "moderate"
pub fn normalize_impact(source: Option<&str>) -> String {
    source
        .map(str::trim)
        .and_then(|impact| {
            SEVERITY_WEIGHTS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(impact))
        })
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| DEFAULT_IMPACT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_are_case_insensitive() {
        assert_eq!(severity_weight("critical"), 5);
        assert_eq!(severity_weight("CRITICAL"), 5);
        assert_eq!(severity_weight("Serious"), 4);
        assert_eq!(severity_weight("high"), 4);
        assert_eq!(severity_weight("minor"), 1);
    }

    #[test]
    fn test_unknown_weight_is_two() {
        assert_eq!(severity_weight(""), 2);
        assert_eq!(severity_weight("catastrophic"), 2);
    }

    #[test]
    fn test_normalize_impact() {
        assert_eq!(normalize_impact(Some("Critical")), "critical");
        assert_eq!(normalize_impact(Some(" low ")), "low");
        assert_eq!(normalize_impact(Some("bogus")), "moderate");
        assert_eq!(normalize_impact(None), "moderate");
    }
}
