//! Completion Provider Port
//!
//! Abstract interface for the remote LLM completion call. The server
//! crate supplies the HTTP implementation; tests supply stubs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{PromptSpec, TriageError};

/// Options for LLM completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: f32,
}

impl Default for CompletionOptions {
    /// Greedy decoding: identical prompts should yield identical output
    fn default() -> Self {
        Self {
            max_tokens: Some(1024),
            temperature: 0.0,
        }
    }
}

/// Response from LLM completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: TokenUsage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Remote completion service
///
/// One call performs exactly one outbound request. Implementations must
/// not retry internally and must bound the wait with a timeout; every
/// failure is reported as [`TriageError::ModelUnavailable`].
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for the prompt
    async fn complete(
        &self,
        prompt: &PromptSpec,
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, TriageError>;

    /// Get the provider name (e.g., "groq")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
