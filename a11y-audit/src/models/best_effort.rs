//! Values produced by optional collaborators
//!
//! A best-effort stage never fails the request. It yields either the value or
//! the reason it is missing, and merge steps match on both arms.

use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Result of a best-effort enrichment call
#[derive(Debug, Clone, PartialEq)]
pub enum BestEffort<T> {
    /// Collaborator produced a value
    Available(T),
    /// Collaborator was absent or failed; the reason is kept for logging only
    Unavailable(String),
}

impl<T> BestEffort<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        BestEffort::Unavailable(reason.into())
    }

    /// Convert a fallible call into a best-effort value, keeping the error text
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => BestEffort::Available(value),
            Err(e) => BestEffort::Unavailable(e.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, BestEffort::Available(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            BestEffort::Available(value) => Some(value),
            BestEffort::Unavailable(_) => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            BestEffort::Available(value) => Some(value),
            BestEffort::Unavailable(_) => None,
        }
    }

    /// Take the value, or build a fallback from the unavailability reason
    pub fn unwrap_or_else(self, fallback: impl FnOnce(&str) -> T) -> T {
        match self {
            BestEffort::Available(value) => value,
            BestEffort::Unavailable(reason) => fallback(&reason),
        }
    }
}

/// Serialized as the value itself, or `null` when unavailable (never omitted)
impl<T: Serialize> Serialize for BestEffort<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BestEffort::Available(value) => serializer.serialize_some(value),
            BestEffort::Unavailable(_) => serializer.serialize_none(),
        }
    }
}
