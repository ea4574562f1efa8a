//! Mercury Domain Library
//!
//! Core types and pure logic for triaging customer support complaints
//! with an LLM.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): complaint, triage record, prompt, errors
//!   - `value_objects/`: closed value sets (Category, Urgency, SuggestedAction)
//! - **Schema** (`schema`): format instructions and the strict record validator
//! - **Prompt Builder** (`prompt_builder`): static instructions + few-shot examples
//! - **Output Parser** (`parser`): raw model text to validated record
//! - **Ports** (`ports/`): the completion service interface
//!
//! # Usage
//!
//! ```rust,ignore
//! use mercury::{parser, prompt_builder, schema, TicketComplaint};
//!
//! let complaint = TicketComplaint::new("I was charged twice!")?;
//! let prompt = prompt_builder::build(&complaint, &schema::describe());
//! // ... send `prompt` through a CompletionProvider ...
//! let record = parser::parse(&raw_model_text)?;
//! ```

pub mod domain;
pub mod parser;
pub mod ports;
pub mod prompt_builder;
pub mod schema;

// Re-export commonly used types
pub use domain::{
    Category, ChatMessage, MessageRole, PromptSpec, SuggestedAction, TicketComplaint,
    TriageError, TriageRecord, Urgency, RAW_PREVIEW_CHARS,
};
pub use ports::{CompletionOptions, CompletionProvider, CompletionResponse, TokenUsage};
