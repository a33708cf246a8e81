//! Common error types for the audit services

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for shared operations
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration loading errors shared by every service
#[derive(Error, Debug)]
pub enum Error {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected shape
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Missing explicit file, bad environment value, or failed validation
    #[error("Configuration error: {0}")]
    Config(String),
}
