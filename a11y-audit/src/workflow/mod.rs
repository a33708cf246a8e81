//! Per-request audit workflow
//!
//! - `pipeline`: runs the stages in dependency order for one URL
//! - `assembly`: merges annotation output back onto the report and builds the response

pub mod assembly;
pub mod pipeline;

pub use assembly::{assemble_response, merge_explanations};
pub use pipeline::{AuditOutcome, AuditPipeline, PipelineError};
