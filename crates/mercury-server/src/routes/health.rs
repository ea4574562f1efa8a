use axum::{extract::State, routing::get, Json, Router};

use crate::models::HealthCheck;
use crate::AppState;

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthCheck)),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Mercury API is running - complaints in, triage out".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.triage.model_id().to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
