//! Schema-less JSON documents stored in the hero's structured columns.
//!
//! Each structured field accepts exactly one wire shape: a JSON object.
//! An absent field or an explicit `null` becomes an empty object; anything
//! else (strings, arrays, numbers) is rejected.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// A schema-less key/value document.
pub type Document = Map<String, Value>;

/// Names of the six structured hero fields, in column order.
pub const STRUCTURED_FIELDS: [&str; 6] = [
    "powerstats",
    "appearance",
    "biography",
    "work",
    "connections",
    "images",
];

/// Check whether a field name is one of the structured hero fields.
pub fn is_structured_field(name: &str) -> bool {
    STRUCTURED_FIELDS.contains(&name)
}

/// Serde adapter: `null` becomes an empty document, objects pass through.
///
/// Pair with `#[serde(default)]` so that a missing field is also empty.
pub fn deserialize_document<'de, D>(deserializer: D) -> Result<Document, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Document>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a document sent as text (multipart form fields).
///
/// Blank text is treated like an absent field. Text that is not a JSON
/// object is a validation error naming the field.
pub fn parse_document_text(field: &str, text: &str) -> Result<Document, CoreError> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Document::new()),
        Ok(_) => Err(CoreError::Validation(format!(
            "{field} must be a JSON object"
        ))),
        Err(e) => Err(CoreError::Validation(format!(
            "{field} is not valid JSON: {e}"
        ))),
    }
}
