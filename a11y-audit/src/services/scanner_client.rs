//! HTTP client for the browser scanning service
//!
//! The scanner is a separate process that drives a headless browser with an
//! accessibility engine. It accepts `POST {"url": ...}` and answers with
//! `{violations, passes, incomplete}`.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::models::ScanResult;
use crate::types::{ScanError, Scanner};

const USER_AGENT: &str = concat!("a11y-audit/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    url: &'a str,
}

/// Scanner service client
pub struct HttpScanner {
    http_client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpScanner {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ScanError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ScanError::Parse(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Scanner for HttpScanner {
    fn name(&self) -> &'static str {
        "http-scanner"
    }

    async fn scan_website(&self, url: &str) -> Result<ScanResult, ScanError> {
        tracing::debug!(url, endpoint = %self.endpoint, "Requesting scan");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&ScanRequest { url })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScanError::Timeout(self.timeout.as_secs())
                } else if e.is_connect() {
                    // The scanner itself is down; not the target's fault
                    tracing::error!(endpoint = %self.endpoint, error = %e, "Scanner service unreachable");
                    ScanError::ServiceUnavailable
                } else {
                    ScanError::Navigation(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            // Body usually carries the browser's navigation error (net::ERR_...)
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScanError::Rejected(status.as_u16(), error_text));
        }

        let result: ScanResult = response
            .json()
            .await
            .map_err(|e| ScanError::Parse(e.to_string()))?;

        tracing::info!(
            url,
            violations = result.violations.len(),
            passes = result.passes.len(),
            incomplete = result.incomplete.len(),
            "Scan complete"
        );

        Ok(result)
    }
}
