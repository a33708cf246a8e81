//! Audit pipeline components
//!
//! Pure, synchronous stages (enricher, prioritizer, validator, comparison
//! advisor, URL and error handling) sit alongside the async stages that call
//! collaborators (report builder, AI annotator) and the HTTP collaborator
//! clients themselves.

pub mod ai_annotator;
pub mod assistant_client;
pub mod comparison_advisor;
pub mod enricher;
pub mod error_sanitizer;
pub mod prioritizer;
pub mod report_builder;
pub mod result_validator;
pub mod scanner_client;
pub mod url_normalizer;

pub use ai_annotator::{annotate, DEFAULT_ANNOTATION_LIMIT};
pub use assistant_client::{AssistantSettings, HttpAssistant};
pub use comparison_advisor::compare;
pub use enricher::enrich;
pub use error_sanitizer::FailureKind;
pub use prioritizer::prioritize;
pub use report_builder::ReportBuilder;
pub use result_validator::{sanity_check, validate};
pub use scanner_client::HttpScanner;
pub use url_normalizer::{normalize_target_url, UrlError};
