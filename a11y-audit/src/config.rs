//! Configuration resolution for a11y-audit
//!
//! Priority (highest last): compiled defaults → TOML file → environment
//! variables → command-line flags. Flags are applied in `main`.

use a11y_common::config::{
    env_parse, env_string, is_valid_key, load_toml_config, ConfigLocation, LoggingConfig,
};
use a11y_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{info, warn};

use crate::admission::AdmissionPolicy;
use crate::services::{AssistantSettings, DEFAULT_ANNOTATION_LIMIT};

/// Module name used for the default config file name
pub const MODULE_NAME: &str = "a11y-audit";

const ENV_BIND_ADDRESS: &str = "A11Y_BIND_ADDRESS";
const ENV_PORT: &str = "A11Y_PORT";
const ENV_LOG_LEVEL: &str = "A11Y_LOG_LEVEL";
const ENV_RATE_LIMIT_MAX: &str = "A11Y_RATE_LIMIT_MAX";
const ENV_RATE_LIMIT_WINDOW: &str = "A11Y_RATE_LIMIT_WINDOW_SECS";
const ENV_SCANNER_ENDPOINT: &str = "A11Y_SCANNER_ENDPOINT";
const ENV_SCANNER_TIMEOUT: &str = "A11Y_SCANNER_TIMEOUT_SECS";
const ENV_ASSISTANT_API_KEY: &str = "A11Y_ASSISTANT_API_KEY";
const ENV_ASSISTANT_MODEL: &str = "A11Y_ASSISTANT_MODEL";
const ENV_ANNOTATION_LIMIT: &str = "A11Y_ANNOTATION_LIMIT";

/// `[rate_limit]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
    /// Period of the background idle-client sweep
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_secs: 60,
            sweep_interval_secs: 300,
        }
    }
}

/// `[scanner]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5781/scan".to_string(),
            timeout_secs: 60,
        }
    }
}

/// `[assistant]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// No key, no assistant
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    pub requests_per_second: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
            requests_per_second: 5,
        }
    }
}

/// `[annotation]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub limit: usize,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_ANNOTATION_LIMIT,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub bind_address: String,
    pub port: u16,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub scanner: ScannerConfig,
    pub assistant: AssistantConfig,
    pub annotation: AnnotationConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5780,
            logging: LoggingConfig::default(),
            rate_limit: RateLimitConfig::default(),
            scanner: ScannerConfig::default(),
            assistant: AssistantConfig::default(),
            annotation: AnnotationConfig::default(),
        }
    }
}

impl AuditConfig {
    /// Load TOML from `location`, overlay environment variables, then validate
    pub fn load(location: &ConfigLocation) -> Result<Self> {
        let mut config: AuditConfig = load_toml_config(location)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `A11Y_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(address) = env_string(ENV_BIND_ADDRESS) {
            self.bind_address = address;
        }
        if let Some(port) = env_parse(ENV_PORT)? {
            self.port = port;
        }
        if let Some(level) = env_string(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(max) = env_parse(ENV_RATE_LIMIT_MAX)? {
            self.rate_limit.max_requests = max;
        }
        if let Some(window) = env_parse(ENV_RATE_LIMIT_WINDOW)? {
            self.rate_limit.window_secs = window;
        }
        if let Some(endpoint) = env_string(ENV_SCANNER_ENDPOINT) {
            self.scanner.endpoint = endpoint;
        }
        if let Some(timeout) = env_parse(ENV_SCANNER_TIMEOUT)? {
            self.scanner.timeout_secs = timeout;
        }
        if let Some(model) = env_string(ENV_ASSISTANT_MODEL) {
            self.assistant.model = model;
        }
        if let Some(limit) = env_parse(ENV_ANNOTATION_LIMIT)? {
            self.annotation.limit = limit;
        }
        self.assistant.api_key = resolve_assistant_api_key(self.assistant.api_key.take());
        Ok(())
    }

    /// Reject values that would make the service misbehave
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit.max_requests == 0 {
            return Err(Error::Config("rate_limit.max_requests must be at least 1".to_string()));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(Error::Config("rate_limit.window_secs must be at least 1".to_string()));
        }
        if self.rate_limit.sweep_interval_secs == 0 {
            return Err(Error::Config(
                "rate_limit.sweep_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.scanner.timeout_secs == 0 {
            return Err(Error::Config("scanner.timeout_secs must be at least 1".to_string()));
        }
        if self.scanner.endpoint.trim().is_empty() {
            return Err(Error::Config("scanner.endpoint must not be empty".to_string()));
        }
        if self.assistant.requests_per_second == 0 {
            return Err(Error::Config(
                "assistant.requests_per_second must be at least 1".to_string(),
            ));
        }
        if self.assistant.timeout_secs == 0 {
            return Err(Error::Config("assistant.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn admission_policy(&self) -> AdmissionPolicy {
        AdmissionPolicy {
            max_requests: NonZeroU32::new(self.rate_limit.max_requests).unwrap_or(NonZeroU32::MIN),
            window: Duration::from_secs(self.rate_limit.window_secs),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.rate_limit.sweep_interval_secs)
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scanner.timeout_secs)
    }

    /// Assistant client settings, or `None` when no credential is configured
    pub fn assistant_settings(&self) -> Option<AssistantSettings> {
        let api_key = self.assistant.api_key.as_ref().filter(|k| is_valid_key(k))?;
        Some(AssistantSettings {
            api_key: api_key.clone(),
            endpoint: self.assistant.endpoint.clone(),
            model: self.assistant.model.clone(),
            timeout: Duration::from_secs(self.assistant.timeout_secs),
            requests_per_second: NonZeroU32::new(self.assistant.requests_per_second)
                .unwrap_or(NonZeroU32::MIN),
        })
    }
}

/// Resolve the assistant credential
///
/// **Priority:** ENV → TOML
fn resolve_assistant_api_key(toml_key: Option<String>) -> Option<String> {
    let env_key = env_string(ENV_ASSISTANT_API_KEY);
    let toml_key = toml_key.filter(|k| is_valid_key(k));

    match (env_key, toml_key) {
        (Some(env_key), Some(_)) => {
            warn!(
                "Assistant API key found in both environment and TOML. Using environment (higher priority)."
            );
            Some(env_key)
        }
        (Some(env_key), None) => {
            info!("Assistant API key loaded from environment variable");
            Some(env_key)
        }
        (None, Some(toml_key)) => {
            info!("Assistant API key loaded from TOML config");
            Some(toml_key)
        }
        (None, None) => None,
    }
}
