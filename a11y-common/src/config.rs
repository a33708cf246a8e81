//! Configuration file discovery, loading, and environment overrides
//!
//! Configuration is layered. Each service starts from compiled defaults, overlays
//! the TOML file (when one is found), then environment variables, then
//! command-line flags. This module owns the first three tiers; flag handling
//! stays with each binary.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "A11Y_CONFIG";

/// Where the configuration file came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Named on the command line or via `A11Y_CONFIG`; must exist
    Explicit(PathBuf),
    /// Platform default location; may be absent
    Discovered(PathBuf),
    /// No candidate location could be determined
    Unresolved,
}

/// Logging section shared by every service config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info", "a11y_audit=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Resolve the configuration file location
///
/// Priority order:
/// 1. Command-line argument
/// 2. `A11Y_CONFIG` environment variable
/// 3. `<platform config dir>/a11y/<module_name>.toml`
pub fn resolve_config_location(cli_arg: Option<&Path>, module_name: &str) -> ConfigLocation {
    if let Some(path) = cli_arg {
        return ConfigLocation::Explicit(path.to_path_buf());
    }

    if let Some(path) = env_string(CONFIG_ENV_VAR) {
        return ConfigLocation::Explicit(PathBuf::from(path));
    }

    match default_config_path(module_name) {
        Some(path) => ConfigLocation::Discovered(path),
        None => ConfigLocation::Unresolved,
    }
}

/// Platform default config file path for a module
pub fn default_config_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("a11y").join(format!("{}.toml", module_name)))
}

/// Load a TOML config from the resolved location
///
/// A missing discovered file is not an error: a warning is logged and defaults
/// are used. A missing explicit file, or any file that fails to parse, is.
pub fn load_toml_config<T>(location: &ConfigLocation) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let path = match location {
        ConfigLocation::Explicit(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        ConfigLocation::Discovered(path) => {
            if !path.exists() {
                warn!(
                    "No config file at {} - using compiled defaults",
                    path.display()
                );
                return Ok(T::default());
            }
            path
        }
        ConfigLocation::Unresolved => {
            warn!("Could not determine config directory - using compiled defaults");
            return Ok(T::default());
        }
    };

    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.clone(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.clone(),
        source,
    })?;

    info!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Read an environment variable, treating blank values as unset
pub fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable
///
/// Unset or blank yields `Ok(None)`; a present but unparsable value is a config error.
pub fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Config(format!("{}={:?} is invalid: {}", name, raw, e))),
    }
}

/// Validate a credential (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
