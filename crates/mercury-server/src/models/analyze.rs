//! Analyze - Request/response bodies of the triage endpoint

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use mercury::TriageError;

/// Analyze request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Free-text customer complaint
    #[serde(default)]
    #[schema(example = "I was charged twice!")]
    pub complaint: Option<String>,
}

/// Error body returned for every failed analysis
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// invalid_input, model_unavailable, malformed_output or schema_violation
    pub error: String,
    pub detail: String,
}

impl ErrorResponse {
    pub fn from_error(err: &TriageError) -> (StatusCode, Self) {
        let status = match err {
            TriageError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TriageError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            TriageError::MalformedOutput { .. } | TriageError::SchemaViolation { .. } => {
                StatusCode::BAD_GATEWAY
            }
        };

        (
            status,
            Self {
                error: err.kind().to_string(),
                detail: err.to_string(),
            },
        )
    }
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
    pub version: String,
    pub model: String,
}
