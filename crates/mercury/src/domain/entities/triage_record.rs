//! TriageRecord - Validated outcome of a complaint analysis
//!
//! Only the schema validator builds records, so a record that exists
//! is always complete and within the closed value sets.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::value_objects::{Category, SuggestedAction, Urgency};
use crate::schema;

/// Structured triage of one support complaint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(example = json!({
    "category": "Billing_Dispute",
    "sentiment": "Frustrated",
    "urgency": "High",
    "suggested_action": "REFUND",
    "draft_response": "I apologize for the error. I have processed a refund."
}))]
pub struct TriageRecord {
    pub(crate) category: Category,
    /// Short descriptive label of the customer's emotional state
    pub(crate) sentiment: String,
    pub(crate) urgency: Urgency,
    pub(crate) suggested_action: SuggestedAction,
    /// Reply addressed to the customer
    pub(crate) draft_response: String,
}

impl TriageRecord {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sentiment(&self) -> &str {
        &self.sentiment
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn suggested_action(&self) -> SuggestedAction {
        self.suggested_action
    }

    pub fn draft_response(&self) -> &str {
        &self.draft_response
    }
}

// Deserialization goes through the strict validator.
impl<'de> Deserialize<'de> for TriageRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        schema::validate(&value).map_err(serde::de::Error::custom)
    }
}
