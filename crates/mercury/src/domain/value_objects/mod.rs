//! Value Objects
//!
//! Closed value sets of the triage record.

mod category;
mod suggested_action;
mod urgency;

pub use category::*;
pub use suggested_action::*;
pub use urgency::*;
