//! Target URL normalization
//!
//! Runs before admission-independent validation and before any scan work.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use thiserror::Error;

static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("A website URL is required")]
    Missing,

    #[error("Invalid URL: {0}")]
    Invalid(String),
}

/// Trim, default the scheme to https, and check the result parses as a web URL
///
/// Returns the prefixed input rather than the parser's serialization, so
/// `example.com` becomes `https://example.com` (no trailing slash added).
pub fn normalize_target_url(input: Option<&str>) -> Result<String, UrlError> {
    let trimmed = input.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(UrlError::Missing);
    }

    let candidate = if SCHEME_PREFIX.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).map_err(|e| UrlError::Invalid(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(UrlError::Invalid(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::Invalid("missing host".to_string()));
    }

    Ok(candidate)
}
