//! TicketComplaint - Raw customer complaint accepted by the pipeline

use crate::domain::errors::TriageError;

/// A non-empty complaint, kept exactly as the customer wrote it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketComplaint {
    text: String,
}

impl TicketComplaint {
    /// Accept a complaint, rejecting empty or whitespace-only text
    pub fn new(text: impl Into<String>) -> Result<Self, TriageError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TriageError::invalid_input("complaint must not be empty"));
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for TicketComplaint {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
