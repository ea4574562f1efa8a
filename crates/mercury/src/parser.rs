//! Output Parser
//!
//! Turns raw model text into a validated [`TriageRecord`].
//!
//! Extraction tolerates whitespace, a markdown code fence, or prose around a
//! single JSON object. It never repairs JSON syntax: text without a parseable
//! object is reported as [`TriageError::MalformedOutput`] with the raw text.

use serde_json::Value;

use crate::domain::{TriageError, TriageRecord};
use crate::schema;

/// Parse and validate raw model output
pub fn parse(raw: &str) -> Result<TriageRecord, TriageError> {
    let value = extract_json(raw).ok_or_else(|| {
        tracing::debug!(raw_len = raw.len(), "No JSON object found in model output");
        TriageError::malformed_output(raw)
    })?;

    schema::validate(&value)
}

/// Locate the JSON object in model text
fn extract_json(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();

    if let Some(value) = parse_object(trimmed) {
        return Some(value);
    }

    if let Some(value) = strip_code_fence(trimmed).and_then(parse_object) {
        return Some(value);
    }

    embedded_object(trimmed)
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

/// Inner text of a ```json ... ``` block wrapping the whole response
fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let body_start = rest.find('\n')?;
    let body = rest[body_start + 1..].trim_end().strip_suffix("```")?;
    Some(body.trim())
}

/// First `{` in the text that opens a complete JSON object
///
/// Stray braces in surrounding prose are skipped; text after the object
/// is ignored.
fn embedded_object(text: &str) -> Option<Value> {
    text.match_indices('{').find_map(|(i, _)| {
        serde_json::Deserializer::from_str(&text[i..])
            .into_iter::<Value>()
            .next()
            .and_then(Result::ok)
            .filter(Value::is_object)
    })
}
