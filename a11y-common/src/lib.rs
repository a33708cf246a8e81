//! # a11y-common
//!
//! Shared code for the accessibility audit services:
//! - Common error and result types
//! - TOML configuration discovery and loading
//! - Environment variable overrides

pub mod config;
pub mod error;

pub use error::{Error, Result};
