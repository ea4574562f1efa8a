//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod groq;

// Re-exports
pub use groq::GroqProvider;
