//! Analyze Routes - Complaint triage

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use mercury::TriageRecord;

use crate::models::{AnalyzeRequest, ErrorResponse};
use crate::AppState;

/// Triage a customer complaint
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Complaint triaged", body = TriageRecord),
        (status = 400, description = "Empty or missing complaint", body = ErrorResponse),
        (status = 502, description = "Model output was malformed or broke the schema", body = ErrorResponse),
        (status = 503, description = "Completion service unavailable", body = ErrorResponse)
    ),
    tag = "Triage"
)]
pub async fn analyze_ticket(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<TriageRecord>, (StatusCode, Json<ErrorResponse>)> {
    let complaint = payload.complaint.unwrap_or_default();

    tracing::info!(complaint_chars = complaint.chars().count(), "Analyzing complaint");

    let record = state.triage.analyze(&complaint).await.map_err(|e| {
        let (status, body) = ErrorResponse::from_error(&e);
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %e, "Triage failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %e, "Triage rejected");
        }
        (status, Json(body))
    })?;

    Ok(Json(record))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze_ticket))
}
