//! SuggestedAction - What support should do next

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Recommended follow-up action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SuggestedAction {
    Refund,
    Replace,
    Troubleshoot,
    Escalate,
}

impl SuggestedAction {
    pub const ALL: [SuggestedAction; 4] = [
        SuggestedAction::Refund,
        SuggestedAction::Replace,
        SuggestedAction::Troubleshoot,
        SuggestedAction::Escalate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestedAction::Refund => "REFUND",
            SuggestedAction::Replace => "REPLACE",
            SuggestedAction::Troubleshoot => "TROUBLESHOOT",
            SuggestedAction::Escalate => "ESCALATE",
        }
    }
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SuggestedAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("Unknown suggested action: {}", s))
    }
}
