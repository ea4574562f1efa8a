//! Mercury API Models
//!
//! Request and response bodies; the triage record itself comes
//! from the domain library.

mod analyze;

pub use analyze::*;
