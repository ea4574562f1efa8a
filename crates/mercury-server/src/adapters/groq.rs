//! Groq Completion Provider
//!
//! Calls an OpenAI-compatible `/chat/completions` endpoint (Groq by default)
//! using reqwest. One request per call, bounded by a timeout, no retries.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use mercury::{
    CompletionOptions, CompletionProvider, CompletionResponse, PromptSpec, TokenUsage,
    TriageError, RAW_PREVIEW_CHARS,
};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of CompletionProvider
#[derive(Clone)]
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GroqProvider {
    /// Creates a provider for the default Groq endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request_body(
        &self,
        prompt: &PromptSpec,
        options: &CompletionOptions,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: prompt
                .messages()
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str().to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(
        &self,
        prompt: &PromptSpec,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, TriageError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.build_request_body(prompt, options);

        tracing::debug!(model = %self.model, url = %url, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| map_transport_error(err, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| map_transport_error(err, self.timeout))?;

        let choice = payload.choices.into_iter().next().ok_or_else(|| {
            TriageError::model_unavailable("completion response contained no choices")
        })?;

        let usage = payload
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        tracing::debug!(
            total_tokens = usage.total_tokens,
            finish_reason = ?choice.finish_reason,
            "Completion received"
        );

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: payload.model.unwrap_or_else(|| self.model.clone()),
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "groq"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// ============================================
// Helper Functions
// ============================================

fn map_transport_error(err: reqwest::Error, timeout: Duration) -> TriageError {
    if err.is_timeout() {
        TriageError::model_unavailable(format!("request timed out after {:?}", timeout))
    } else if err.is_decode() {
        TriageError::model_unavailable(format!("undecodable completion response: {}", err))
    } else {
        TriageError::model_unavailable(format!("request failed: {}", err))
    }
}

fn map_http_error(status: StatusCode, body: String) -> TriageError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    let reason = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        "authentication failed"
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        "rate limited"
    } else if status.is_server_error() {
        "upstream server error"
    } else {
        "request rejected"
    };

    TriageError::model_unavailable(format!(
        "{} ({}): {}",
        reason,
        status.as_u16(),
        truncate_chars(message.trim())
    ))
}

/// Error bodies can be whole HTML pages
fn truncate_chars(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(RAW_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
