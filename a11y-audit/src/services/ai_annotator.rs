//! Optional AI Annotator
//!
//! Sends the first `limit` prioritized violations to the assistant for a
//! plain-language explanation. Calls run concurrently and fail independently;
//! output order always follows input order. Without an assistant the stage is
//! an identity pass.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::models::{AnnotatedViolation, BestEffort, EnrichedViolation};
use crate::types::Assistant;

/// Number of prioritized violations annotated by default
pub const DEFAULT_ANNOTATION_LIMIT: usize = 5;

/// Annotate the head of the prioritized list
pub async fn annotate(
    prioritized: Vec<EnrichedViolation>,
    assistant: Option<&dyn Assistant>,
    limit: usize,
) -> Vec<AnnotatedViolation> {
    let Some(assistant) = assistant else {
        return prioritized
            .into_iter()
            .map(|violation| AnnotatedViolation {
                violation,
                explanation: BestEffort::unavailable("no assistant configured"),
            })
            .collect();
    };

    let split = limit.min(prioritized.len());
    let mut prioritized = prioritized;
    let tail = prioritized.split_off(split);
    let head = prioritized;

    debug!(annotating = head.len(), passthrough = tail.len(), "Requesting AI explanations");

    let explanations = join_all(head.iter().map(|violation| async move {
        match assistant.explain(violation).await {
            Ok(text) if !text.trim().is_empty() => BestEffort::Available(text),
            Ok(_) => BestEffort::unavailable("empty explanation"),
            Err(e) => {
                warn!(issue = %violation.id, error = %e, "AI explanation skipped");
                BestEffort::unavailable(e.to_string())
            }
        }
    }))
    .await;

    head.into_iter()
        .zip(explanations)
        .map(|(violation, explanation)| AnnotatedViolation {
            violation,
            explanation,
        })
        .chain(tail.into_iter().map(|violation| AnnotatedViolation {
            violation,
            explanation: BestEffort::unavailable("beyond annotation limit"),
        }))
        .collect()
}
