//! Domain Errors
//!
//! Every failure of the triage pipeline is one of these four kinds.

use thiserror::Error;

/// Maximum number of raw upstream characters echoed back in error messages.
pub const RAW_PREVIEW_CHARS: usize = 200;

/// Triage pipeline errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    /// Empty or missing complaint text, detected before any remote call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The completion service could not be reached or refused the call
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model response did not contain a parseable JSON object
    #[error("Malformed model output: {}", preview(.raw))]
    MalformedOutput { raw: String },

    /// The model response parsed but broke the triage record schema
    #[error("Schema violation on field '{field}': received {received}")]
    SchemaViolation { field: String, received: String },
}

impl TriageError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::ModelUnavailable(message.into())
    }

    pub fn malformed_output(raw: impl Into<String>) -> Self {
        Self::MalformedOutput { raw: raw.into() }
    }

    pub fn schema_violation(field: impl Into<String>, received: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            received: received.into(),
        }
    }

    /// Stable snake_case identifier of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            TriageError::InvalidInput(_) => "invalid_input",
            TriageError::ModelUnavailable(_) => "model_unavailable",
            TriageError::MalformedOutput { .. } => "malformed_output",
            TriageError::SchemaViolation { .. } => "schema_violation",
        }
    }

    /// Whether a fresh model attempt could plausibly produce a valid record
    pub fn is_output_error(&self) -> bool {
        matches!(
            self,
            TriageError::MalformedOutput { .. } | TriageError::SchemaViolation { .. }
        )
    }
}

fn preview(raw: &str) -> String {
    let mut chars = raw.chars();
    let head: String = chars.by_ref().take(RAW_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{:?}...", head)
    } else {
        format!("{:?}", head)
    }
}
