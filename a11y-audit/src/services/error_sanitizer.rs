//! Maps internal scan failures onto fixed user-facing messages
//!
//! The raw error text is matched against known failure signatures and never
//! returned to the client.

use serde::Serialize;

/// Known failure classes, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    NameNotResolved,
    ConnectionRefused,
    Timeout,
    Network,
    Unknown,
}

/// Signature table; the first class with a matching substring wins
const SIGNATURES: [(FailureKind, &[&str]); 4] = [
    (
        FailureKind::NameNotResolved,
        &[
            "err_name_not_resolved",
            "enotfound",
            "dns error",
            "failed to lookup address",
            "name or service not known",
        ],
    ),
    (
        FailureKind::ConnectionRefused,
        &["err_connection_refused", "econnrefused", "connection refused"],
    ),
    (
        FailureKind::Timeout,
        &["timeout", "timed out", "err_timed_out"],
    ),
    (
        FailureKind::Network,
        &[
            "net::err",
            "network",
            "econnreset",
            "connection reset",
            "err_internet_disconnected",
        ],
    ),
];

impl FailureKind {
    /// Classify raw error text (case-insensitive)
    pub fn classify(error_text: &str) -> Self {
        let haystack = error_text.to_lowercase();
        SIGNATURES
            .iter()
            .find(|(_, needles)| needles.iter().any(|needle| haystack.contains(needle)))
            .map(|(kind, _)| *kind)
            .unwrap_or(FailureKind::Unknown)
    }

    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::NameNotResolved => "SITE_NOT_FOUND",
            FailureKind::ConnectionRefused => "CONNECTION_REFUSED",
            FailureKind::Timeout => "SCAN_TIMEOUT",
            FailureKind::Network => "NETWORK_ERROR",
            FailureKind::Unknown => "AUDIT_FAILED",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::NameNotResolved => {
                "Could not find the website. Please check the URL and try again."
            }
            FailureKind::ConnectionRefused => {
                "The website refused the connection. It may be down or blocking automated access."
            }
            FailureKind::Timeout => {
                "The website took too long to respond. Please try again later."
            }
            FailureKind::Network => {
                "A network error occurred while loading the website. Please try again."
            }
            FailureKind::Unknown => "The audit could not be completed. Please try again later.",
        }
    }
}
