//! Chat-completions client for the optional AI assistant
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. Only built when
//! an API key is configured; without one every assistant stage degrades.
//!
//! Outbound calls share one `governor` quota so a burst of per-issue requests
//! from concurrent audits stays under the provider's rate limit.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::time::Duration;

use crate::models::{DetailedIssue, EnrichedViolation, Remediation};
use crate::types::{Assistant, AssistantError};

const USER_AGENT: &str = concat!("a11y-audit/", env!("CARGO_PKG_VERSION"));
const SYSTEM_PROMPT: &str = "You are a web accessibility expert. Answer concisely for a \
    developer audience and reference WCAG success criteria where relevant.";
/// Issues listed individually in a summary prompt
const SUMMARY_ISSUE_LIMIT: usize = 20;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Assistant client settings
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
    pub requests_per_second: NonZeroU32,
}

/// OpenAI-compatible assistant client
pub struct HttpAssistant {
    http_client: reqwest::Client,
    settings: AssistantSettings,
    rate_limiter: RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl HttpAssistant {
    pub fn new(settings: AssistantSettings) -> Result<Self, AssistantError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let rate_limiter = RateLimiter::direct(Quota::per_second(settings.requests_per_second));

        Ok(Self {
            http_client,
            settings,
            rate_limiter,
        })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Send one system + user exchange and return the reply text
    async fn complete(&self, prompt: String) -> Result<String, AssistantError> {
        self.rate_limiter.until_ready().await;

        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.2,
        };

        let response = self
            .http_client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AssistantError::InvalidApiKey);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api(status.as_u16(), error_text));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Parse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(AssistantError::EmptyResponse)
    }
}

#[async_trait]
impl Assistant for HttpAssistant {
    fn name(&self) -> &'static str {
        "chat-completions"
    }

    async fn explain(&self, violation: &EnrichedViolation) -> Result<String, AssistantError> {
        self.complete(explanation_prompt(violation)).await
    }

    async fn suggest_remediation(
        &self,
        violation: &EnrichedViolation,
    ) -> Result<Remediation, AssistantError> {
        let reply = self.complete(remediation_prompt(violation)).await?;
        Ok(parse_remediation(&reply))
    }

    async fn summarize(
        &self,
        url: &str,
        issues: &[DetailedIssue],
    ) -> Result<String, AssistantError> {
        self.complete(summary_prompt(url, issues)).await
    }
}

fn describe(violation: &EnrichedViolation) -> String {
    format!(
        "Rule: {}\nImpact: {}\nDescription: {}\nWCAG tags: {}\nAffected elements: {}",
        violation.id,
        violation.impact,
        violation.description,
        if violation.wcag.is_empty() {
            "none".to_string()
        } else {
            violation.wcag.join(", ")
        },
        violation.nodes.len()
    )
}

fn explanation_prompt(violation: &EnrichedViolation) -> String {
    format!(
        "Explain in two or three sentences who is affected by this accessibility \
         violation and why it matters.\n\n{}",
        describe(violation)
    )
}

fn remediation_prompt(violation: &EnrichedViolation) -> String {
    format!(
        "Suggest how to fix this accessibility violation. Reply with JSON only, shaped as \
         {{\"suggestion\": string, \"steps\": [string]}}.\n\n{}",
        describe(violation)
    )
}

fn summary_prompt(url: &str, issues: &[DetailedIssue]) -> String {
    let mut prompt = format!(
        "Write a short executive summary of the accessibility audit of {} which found {} \
         issue(s).\n",
        url,
        issues.len()
    );
    for issue in issues.iter().take(SUMMARY_ISSUE_LIMIT) {
        prompt.push_str(&format!("- [{}] {}: {}\n", issue.impact, issue.id, issue.description));
    }
    if issues.len() > SUMMARY_ISSUE_LIMIT {
        prompt.push_str(&format!("- ...and {} more\n", issues.len() - SUMMARY_ISSUE_LIMIT));
    }
    prompt
}

/// Accept the requested JSON, JSON inside a code fence, or plain prose
fn parse_remediation(reply: &str) -> Remediation {
    let trimmed = reply.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    serde_json::from_str::<Remediation>(unfenced).unwrap_or_else(|_| Remediation {
        suggestion: trimmed.to_string(),
        steps: Vec::new(),
    })
}
