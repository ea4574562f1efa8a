//! Application Layer (Use Cases)
//!
//! Orchestrates the triage pipeline between the domain library
//! and the completion service.

mod triage_service;

pub use triage_service::TriageService;
