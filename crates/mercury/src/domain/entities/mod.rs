//! Domain Entities
//!
//! - TicketComplaint: raw complaint accepted by the pipeline
//! - TriageRecord: validated analysis result
//! - PromptSpec: messages sent to the completion service

mod complaint;
mod prompt;
mod triage_record;

pub use complaint::*;
pub use prompt::*;
pub use triage_record::*;
