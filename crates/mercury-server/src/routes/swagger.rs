//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use mercury::{Category, SuggestedAction, TriageRecord, Urgency};

use crate::models::{AnalyzeRequest, ErrorResponse, HealthCheck};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::analyze::analyze_ticket,
        super::health::health_check,
    ),
    info(
        title = "Mercury API",
        version = "0.1.0",
        description = "Auto-triage for customer support complaints.\n\nClassifies a complaint into category, sentiment, urgency and a suggested action, and drafts a reply.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Triage", description = "Triage - LLM complaint analysis"),
    ),
    components(
        schemas(
            // Triage
            AnalyzeRequest,
            TriageRecord,
            Category,
            Urgency,
            SuggestedAction,
            ErrorResponse,
            // Health
            HealthCheck,
        )
    ),
)]
pub struct ApiDoc;
