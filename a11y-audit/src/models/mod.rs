//! Data models for a11y-audit
//!
//! Everything here except the admission state is built fresh per request and
//! dropped once the response is sent.

pub mod best_effort;
pub mod comparison;
pub mod impact;
pub mod report;
pub mod request;
pub mod scan;
pub mod validation;
pub mod violation;

pub use best_effort::BestEffort;
pub use comparison::IndustryComparison;
pub use impact::{normalize_impact, severity_weight, DEFAULT_IMPACT};
pub use report::{AuditReport, DetailedIssue, Remediation, ReportMeta};
pub use request::{AuditRequest, AuditResponse, Performance, ValidationSummary};
pub use scan::ScanResult;
pub use validation::{IssueRef, Quality, SanityCheck, ValidationResult};
pub use violation::{AnnotatedViolation, EnrichedViolation, RawViolation};
