//! Shared fixtures for a11y-audit integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use a11y_audit::admission::{AdmissionController, AdmissionPolicy, ManualClock};
use a11y_audit::models::{DetailedIssue, EnrichedViolation, Remediation, ScanResult};
use a11y_audit::types::{Assistant, AssistantError, ScanError, Scanner};
use a11y_audit::workflow::AuditPipeline;
use a11y_audit::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::{json, Value};

/// Scanner that records every URL and replays a fixed outcome
pub struct FakeScanner {
    violations: Vec<Value>,
    failure: Option<String>,
    pub urls: Mutex<Vec<String>>,
}

impl FakeScanner {
    pub fn returning(violations: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            violations,
            failure: None,
            urls: Mutex::new(Vec::new()),
        })
    }

    /// Every scan fails with a navigation error carrying `message`
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            violations: Vec::new(),
            failure: Some(message.to_string()),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn scanned_urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scanner for FakeScanner {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn scan_website(&self, url: &str) -> Result<ScanResult, ScanError> {
        self.urls.lock().unwrap().push(url.to_string());
        match &self.failure {
            Some(message) => Err(ScanError::Navigation(message.clone())),
            None => Ok(ScanResult {
                violations: self.violations.clone(),
                ..Default::default()
            }),
        }
    }
}

/// Assistant with canned answers; ids in `failing_ids` fail to explain
#[derive(Default)]
pub struct FakeAssistant {
    failing_ids: HashSet<String>,
    summary_fails: bool,
    pub explain_calls: AtomicUsize,
}

impl FakeAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            failing_ids: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn without_summary(mut self) -> Self {
        self.summary_fails = true;
        self
    }
}

#[async_trait]
impl Assistant for FakeAssistant {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn explain(&self, violation: &EnrichedViolation) -> Result<String, AssistantError> {
        self.explain_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_ids.contains(&violation.id) {
            return Err(AssistantError::Api(503, "overloaded".to_string()));
        }
        Ok(format!("Explanation for {}", violation.id))
    }

    async fn suggest_remediation(
        &self,
        violation: &EnrichedViolation,
    ) -> Result<Remediation, AssistantError> {
        if self.failing_ids.contains(&violation.id) {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(Remediation {
            suggestion: format!("Fix {}", violation.id),
            steps: vec!["Locate the element".to_string()],
        })
    }

    async fn summarize(
        &self,
        url: &str,
        issues: &[DetailedIssue],
    ) -> Result<String, AssistantError> {
        if self.summary_fails {
            return Err(AssistantError::Network("connection reset".to_string()));
        }
        Ok(format!("{} has {} issue(s) worth fixing.", url, issues.len()))
    }
}

pub fn policy(max_requests: u32, window_secs: u64) -> AdmissionPolicy {
    AdmissionPolicy {
        max_requests: NonZeroU32::new(max_requests).unwrap(),
        window: Duration::from_secs(window_secs),
    }
}

/// App state with default admission policy and a manual clock
pub fn test_app_state(
    scanner: Arc<FakeScanner>,
    assistant: Option<Arc<dyn Assistant>>,
) -> (AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let admission = AdmissionController::with_clock(AdmissionPolicy::default(), clock.clone());
    let pipeline = AuditPipeline::new(scanner, assistant, Duration::from_secs(5), 5);
    (AppState::new(Arc::new(admission), Arc::new(pipeline)), clock)
}

pub fn violation(id: &str, impact: &str) -> Value {
    json!({
        "id": id,
        "impact": impact,
        "description": format!("{} description", id),
        "tags": ["wcag2a", "cat.text-alternatives"],
        "nodes": [{"target": ["#main"]}],
    })
}

pub fn audit_request(client: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/audit")
        .header("content-type", "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
