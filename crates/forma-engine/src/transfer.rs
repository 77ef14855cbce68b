//! # Form-State Export & Import
//!
//! Serializes a `{schema, data}` pair to a pretty-printed JSON document
//! and classifies uploaded documents by structural shape: either a full
//! form-state document or a standalone schema. Classification is shape
//! driven, there is no type tag in the files.
//!
//! Imported schemas are *not* structurally validated here; the loading
//! path ([`forma_schema::SchemaDocument`]) owns that gate.

use forma_core::FormData;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from export/import handling.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The uploaded text is not valid JSON.
    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The form state could not be serialized.
    #[error("could not serialize form state: {0}")]
    Serialize(#[source] serde_json::Error),
}

// ─── Form State ──────────────────────────────────────────────────────

/// A saved form: the raw schema document plus the entered data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    /// The raw schema document as loaded.
    pub schema: Value,
    /// The entered form data.
    pub data: FormData,
}

impl FormState {
    pub fn new(schema: Value, data: FormData) -> Self {
        Self { schema, data }
    }

    /// Render the export document, pretty-printed for hand inspection.
    pub fn to_pretty_json(&self) -> Result<String, TransferError> {
        serde_json::to_string_pretty(self).map_err(TransferError::Serialize)
    }
}

// ─── Import Classification ───────────────────────────────────────────

/// What an uploaded document turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportedDocument {
    /// A full form-state document: schema plus entered data.
    FormState(FormState),
    /// A standalone schema document.
    Schema(Value),
}

/// Parse uploaded text and classify it.
pub fn parse_import(text: &str) -> Result<ImportedDocument, TransferError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(classify(value))
}

/// Classify a parsed document by shape. Anything that is not a
/// recognizable form-state document is treated as a schema candidate.
pub fn classify(value: Value) -> ImportedDocument {
    if is_form_state(&value) {
        if let Ok(state) = serde_json::from_value::<FormState>(value.clone()) {
            return ImportedDocument::FormState(state);
        }
    }
    ImportedDocument::Schema(value)
}

/// Shape check for a form-state document: a `schema` member that is an
/// object schema with `properties`, and an object `data` member.
fn is_form_state(value: &Value) -> bool {
    let Some(schema) = value.get("schema") else {
        return false;
    };
    let Some(data) = value.get("data") else {
        return false;
    };
    schema.get("type").and_then(Value::as_str) == Some("object")
        && schema.get("properties").is_some_and(Value::is_object)
        && data.is_object()
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Value {
        json!({
            "type": "object",
            "title": "Contact",
            "properties": {"name": {"type": "string"}},
            "required": ["name"]
        })
    }

    #[test]
    fn test_export_import_round_trip_is_lossless() {
        let data = FormData::from_value(json!({"name": "Ada", "tags": ["a", "b"]})).unwrap();
        let state = FormState::new(sample_schema(), data);

        let text = state.to_pretty_json().unwrap();
        let imported = parse_import(&text).unwrap();

        assert_eq!(imported, ImportedDocument::FormState(state));
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let state = FormState::new(sample_schema(), FormData::new());
        let text = state.to_pretty_json().unwrap();
        assert!(text.contains("\n  \"schema\""));
    }

    #[test]
    fn test_standalone_schema_classifies_as_schema() {
        let imported = classify(sample_schema());
        assert_eq!(imported, ImportedDocument::Schema(sample_schema()));
    }

    #[test]
    fn test_schema_without_properties_is_not_form_state() {
        let document = json!({
            "schema": {"type": "object", "title": "T"},
            "data": {}
        });
        assert!(matches!(
            classify(document),
            ImportedDocument::Schema(_)
        ));
    }

    #[test]
    fn test_non_object_data_member_is_not_form_state() {
        let document = json!({
            "schema": sample_schema(),
            "data": [1, 2, 3]
        });
        assert!(matches!(
            classify(document),
            ImportedDocument::Schema(_)
        ));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = parse_import("{not json").unwrap_err();
        assert!(matches!(err, TransferError::Parse(_)));
    }
}
