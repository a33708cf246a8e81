//! Comparison Advisor
//!
//! Attaches fixed guidance on how automated results vary between tools. Only
//! the URL comes from the report; nothing is computed from scan data.

use crate::models::{AuditReport, IndustryComparison};

const RECOMMENDATIONS: [&str; 5] = [
    "Cross-check results with a second automated engine such as WAVE or Lighthouse",
    "Test keyboard-only navigation through every interactive element",
    "Review the page with a screen reader (NVDA, JAWS or VoiceOver)",
    "Verify colour contrast on hover, focus and disabled states manually",
    "Include users with disabilities in usability testing before sign-off",
];

const EXPECTED_VARIANCES: &str = "Automated accessibility tools apply different rule sets, \
    versions and heuristics, so issue counts and scores for the same page commonly differ \
    between tools. Automated checks detect roughly 30-40% of WCAG failures; the rest need \
    manual review.";

const INTERPRETATION_GUIDE: &str = "The score is a linear penalty on the number of \
    automatically detected violations and is not a conformance rating. Use the prioritized \
    issue list to plan fixes, starting with critical and serious impacts, and treat a high \
    score as a starting point for manual testing rather than proof of compliance.";

/// Static guidance for a finished report
pub fn compare(report: &AuditReport) -> IndustryComparison {
    guidance_for(&report.url)
}

/// Guidance for a URL; a pure function of its input
pub fn guidance_for(url: &str) -> IndustryComparison {
    IndustryComparison {
        url: url.to_string(),
        recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        expected_variances: EXPECTED_VARIANCES.to_string(),
        interpretation_guide: INTERPRETATION_GUIDE.to_string(),
    }
}
