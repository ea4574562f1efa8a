//! Triage Record Schema
//!
//! Single source of truth for the record's field names, types and closed
//! value sets. `describe` renders the format instructions embedded in the
//! prompt; `validate` turns a parsed JSON candidate into a [`TriageRecord`].
//!
//! Validation is strict: nothing is coerced, trimmed or defaulted.

use serde_json::{Map, Value};

use crate::domain::{Category, SuggestedAction, TriageError, TriageRecord, Urgency};

/// Field name reported when the candidate is not a JSON object at all
pub const ROOT_FIELD: &str = "$root";

/// Received value reported for an absent field
pub const MISSING: &str = "<missing>";

/// One field of the wire contract
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Closed value set, `None` for free text
    pub allowed: Option<&'static [&'static str]>,
}

const CATEGORY_VALUES: &[&str] = &[
    "Hardware_Defect",
    "Software_Bug",
    "Billing_Dispute",
    "Shipping_Delay",
    "User_Error",
];
const URGENCY_VALUES: &[&str] = &["Low", "Medium", "High", "Critical"];
const ACTION_VALUES: &[&str] = &["REFUND", "REPLACE", "TROUBLESHOOT", "ESCALATE"];

/// Wire fields, in wire order
pub const FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        name: "category",
        description: "The root-cause category of the ticket",
        allowed: Some(CATEGORY_VALUES),
    },
    FieldSpec {
        name: "sentiment",
        description: "A short label for the customer's emotional state, e.g. \"Frustrated\"",
        allowed: None,
    },
    FieldSpec {
        name: "urgency",
        description: "How quickly the ticket needs attention",
        allowed: Some(URGENCY_VALUES),
    },
    FieldSpec {
        name: "suggested_action",
        description: "The action support should take next",
        allowed: Some(ACTION_VALUES),
    },
    FieldSpec {
        name: "draft_response",
        description: "A drafted reply addressed directly to the customer",
        allowed: None,
    },
];

/// Format instructions describing the exact JSON shape the model must return
pub fn describe() -> String {
    let mut text = String::from(
        "The output must be a single JSON object containing exactly the fields below, \
         all of them required and all of them JSON strings. Do not add other fields. \
         Do not wrap the object in markdown code fences and do not write any text \
         before or after it.\n\nFields:\n",
    );

    for field in &FIELDS {
        text.push_str(&format!(
            "- \"{}\" (string, required): {}.",
            field.name, field.description
        ));
        if let Some(allowed) = field.allowed {
            let values = allowed
                .iter()
                .map(|v| format!("\"{}\"", v))
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!(" Must be exactly one of: {}.", values));
        } else {
            text.push_str(" Must not be empty.");
        }
        text.push('\n');
    }

    text.push_str("\nShape:\n{");
    let shape = FIELDS
        .iter()
        .map(|f| format!("\"{}\": \"<{}>\"", f.name, f.name))
        .collect::<Vec<_>>()
        .join(", ");
    text.push_str(&shape);
    text.push_str("}\n");

    text
}

/// Strictly validate a parsed candidate into a [`TriageRecord`].
///
/// Fields are checked in wire order and the first violation is reported.
/// Extra keys are ignored and never reach the record.
pub fn validate(candidate: &Value) -> Result<TriageRecord, TriageError> {
    let object = candidate
        .as_object()
        .ok_or_else(|| TriageError::schema_violation(ROOT_FIELD, truncate(candidate.to_string())))?;

    Ok(TriageRecord {
        category: enum_field::<Category>(object, "category")?,
        sentiment: text_field(object, "sentiment")?,
        urgency: enum_field::<Urgency>(object, "urgency")?,
        suggested_action: enum_field::<SuggestedAction>(object, "suggested_action")?,
        draft_response: text_field(object, "draft_response")?,
    })
}

fn string_field<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a str, TriageError> {
    match object.get(name) {
        None => Err(TriageError::schema_violation(name, MISSING)),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(TriageError::schema_violation(
            name,
            truncate(other.to_string()),
        )),
    }
}

fn enum_field<T: std::str::FromStr>(
    object: &Map<String, Value>,
    name: &str,
) -> Result<T, TriageError> {
    let raw = string_field(object, name)?;
    raw.parse::<T>()
        .map_err(|_| TriageError::schema_violation(name, quoted(raw)))
}

fn text_field(object: &Map<String, Value>, name: &str) -> Result<String, TriageError> {
    let raw = string_field(object, name)?;
    if raw.trim().is_empty() {
        return Err(TriageError::schema_violation(name, quoted(raw)));
    }
    Ok(raw.to_string())
}

fn quoted(s: &str) -> String {
    truncate(Value::from(s).to_string())
}

fn truncate(rendered: String) -> String {
    const MAX: usize = 120;
    if rendered.chars().count() <= MAX {
        return rendered;
    }
    let head: String = rendered.chars().take(MAX).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "category": "Billing_Dispute",
            "sentiment": "Frustrated",
            "urgency": "High",
            "suggested_action": "REFUND",
            "draft_response": "I apologize for the error. I have processed a refund."
        })
    }

    fn violation(candidate: &Value) -> (String, String) {
        match validate(candidate) {
            Err(TriageError::SchemaViolation { field, received }) => (field, received),
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_record() {
        let record = validate(&valid()).unwrap();
        assert_eq!(record.category(), Category::BillingDispute);
        assert_eq!(record.sentiment(), "Frustrated");
        assert_eq!(record.urgency(), Urgency::High);
        assert_eq!(record.suggested_action(), SuggestedAction::Refund);
    }

    #[test]
    fn test_missing_field() {
        for field in FIELDS {
            let mut candidate = valid();
            candidate.as_object_mut().unwrap().remove(field.name);
            assert_eq!(
                violation(&candidate),
                (field.name.to_string(), MISSING.to_string())
            );
        }
    }

    #[test]
    fn test_category_outside_set() {
        let mut candidate = valid();
        candidate["category"] = json!("Account_Access");
        assert_eq!(
            violation(&candidate),
            ("category".to_string(), "\"Account_Access\"".to_string())
        );
    }

    #[test]
    fn test_urgency_outside_set() {
        let mut candidate = valid();
        candidate["urgency"] = json!("Urgent");
        assert_eq!(violation(&candidate).0, "urgency");
    }

    #[test]
    fn test_action_outside_set() {
        let mut candidate = valid();
        candidate["suggested_action"] = json!("CALL_BACK");
        assert_eq!(violation(&candidate).0, "suggested_action");
    }

    #[test]
    fn test_enum_values_are_case_sensitive() {
        let mut candidate = valid();
        candidate["urgency"] = json!("high");
        assert_eq!(violation(&candidate).0, "urgency");

        let mut candidate = valid();
        candidate["category"] = json!(" Billing_Dispute");
        assert_eq!(violation(&candidate).0, "category");
    }

    #[test]
    fn test_wrong_primitive_type() {
        let mut candidate = valid();
        candidate["sentiment"] = json!(3);
        assert_eq!(
            violation(&candidate),
            ("sentiment".to_string(), "3".to_string())
        );

        let mut candidate = valid();
        candidate["urgency"] = json!(null);
        assert_eq!(
            violation(&candidate),
            ("urgency".to_string(), "null".to_string())
        );
    }

    #[test]
    fn test_blank_free_text() {
        let mut candidate = valid();
        candidate["draft_response"] = json!("   ");
        assert_eq!(violation(&candidate).0, "draft_response");
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(violation(&json!([1, 2])).0, ROOT_FIELD);
        assert_eq!(violation(&json!("text")).0, ROOT_FIELD);
    }

    #[test]
    fn test_first_violation_in_wire_order() {
        let candidate = json!({ "urgency": "Never" });
        assert_eq!(violation(&candidate).0, "category");
    }

    #[test]
    fn test_extra_fields_are_dropped() {
        let mut candidate = valid();
        candidate["confidence"] = json!(0.9);
        let record = validate(&candidate).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("confidence").is_none());
    }

    #[test]
    fn test_describe_lists_every_permitted_value() {
        let text = describe();
        for field in FIELDS {
            assert!(text.contains(&format!("\"{}\"", field.name)));
        }
        for category in Category::ALL {
            assert!(text.contains(&format!("\"{}\"", category)));
        }
        for urgency in Urgency::ALL {
            assert!(text.contains(&format!("\"{}\"", urgency)));
        }
        for action in SuggestedAction::ALL {
            assert!(text.contains(&format!("\"{}\"", action)));
        }
    }

    #[test]
    fn test_value_lists_match_enums() {
        let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        let urgencies: Vec<&str> = Urgency::ALL.iter().map(|u| u.as_str()).collect();
        let actions: Vec<&str> = SuggestedAction::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(categories, CATEGORY_VALUES);
        assert_eq!(urgencies, URGENCY_VALUES);
        assert_eq!(actions, ACTION_VALUES);
    }
}
