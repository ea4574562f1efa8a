//! Category - Root-cause classification of a complaint

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ticket category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "Hardware_Defect")]
    HardwareDefect,
    #[serde(rename = "Software_Bug")]
    SoftwareBug,
    #[serde(rename = "Billing_Dispute")]
    BillingDispute,
    #[serde(rename = "Shipping_Delay")]
    ShippingDelay,
    #[serde(rename = "User_Error")]
    UserError,
}

impl Category {
    /// Every permitted category, in prompt order
    pub const ALL: [Category; 5] = [
        Category::HardwareDefect,
        Category::SoftwareBug,
        Category::BillingDispute,
        Category::ShippingDelay,
        Category::UserError,
    ];

    /// Wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HardwareDefect => "Hardware_Defect",
            Category::SoftwareBug => "Software_Bug",
            Category::BillingDispute => "Billing_Dispute",
            Category::ShippingDelay => "Shipping_Delay",
            Category::UserError => "User_Error",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}
