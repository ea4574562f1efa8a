//! Mercury API Routes
//!
//! - POST /analyze - Complaint triage
//! - GET /health - Liveness and configured model

pub mod analyze;
pub mod health;
pub mod swagger;
