//! # Schema Documents
//!
//! Loading and structural validation of schema documents. The raw JSON is
//! retained verbatim alongside the typed root: exports and submissions
//! always ship the document exactly as it was loaded, byte-identical
//! through a round trip.
//!
//! ## Structural vs. data validation
//!
//! Structural errors describe a malformed *schema* (missing root
//! `properties`, an unknown property type, an array without `items`) and
//! block loading outright. They are a different failure class from data
//! validation errors, which are per-field and recoverable; see
//! [`crate::project`].

use crate::node::{ObjectSchema, SchemaNode};
use serde_json::Value;

/// A loaded, structurally valid schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    raw: Value,
    root: ObjectSchema,
}

/// Error raised while loading a schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The document is JSON but not an acceptable schema. `problems`
    /// holds every human-readable finding; nothing partially applies.
    #[error("schema failed structural validation: {}", problems.join("; "))]
    Structural { problems: Vec<String> },
    /// The document is not valid JSON, or a constraint value has the
    /// wrong JSON type for the typed model.
    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

const VALID_TYPES: &str = "string, number, integer, boolean, array, object";

impl SchemaDocument {
    /// Parse JSON text into a schema document.
    pub fn from_str(text: &str) -> Result<Self, SchemaError> {
        let raw: Value = serde_json::from_str(text)?;
        Self::from_value(raw)
    }

    /// Validate and adopt an already parsed JSON value.
    pub fn from_value(raw: Value) -> Result<Self, SchemaError> {
        let problems = structural_problems(&raw);
        if !problems.is_empty() {
            return Err(SchemaError::Structural { problems });
        }
        let node: SchemaNode = serde_json::from_value(raw.clone())?;
        match node {
            SchemaNode::Object(root) => Ok(Self { raw, root }),
            _ => Err(SchemaError::Structural {
                problems: vec!["Root schema type must be \"object\"".to_string()],
            }),
        }
    }

    /// The document exactly as loaded.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The typed root object schema.
    pub fn root(&self) -> &ObjectSchema {
        &self.root
    }

    /// The root `title`, which structural validation guarantees exists.
    pub fn title(&self) -> &str {
        self.root.title.as_deref().unwrap_or_default()
    }
}

/// Run the load-time structural checks against a raw document.
///
/// The four root-shape checks each short-circuit with a single finding;
/// the per-property checks recurse through `properties` and `items` and
/// accumulate everything they see.
pub fn structural_problems(schema: &Value) -> Vec<String> {
    let Some(root) = schema.as_object() else {
        return vec!["Schema must be an object".to_string()];
    };
    if root.get("type").and_then(Value::as_str) != Some("object") {
        return vec!["Root schema type must be \"object\"".to_string()];
    }
    let Some(properties) = root.get("properties").and_then(Value::as_object) else {
        return vec!["Schema must have a \"properties\" object".to_string()];
    };
    if !root
        .get("title")
        .and_then(Value::as_str)
        .is_some_and(|title| !title.is_empty())
    {
        return vec!["Schema must have a \"title\" string".to_string()];
    }

    let mut problems = Vec::new();
    for (name, property) in properties {
        check_property(property, name, &mut problems);
    }
    problems
}

fn check_property(property: &Value, path: &str, problems: &mut Vec<String>) {
    let declared = property.get("type").and_then(Value::as_str);
    let Some(kind) = declared.filter(|t| is_valid_type(t)) else {
        problems.push(format!(
            "Property \"{path}\" must have a valid type ({VALID_TYPES})"
        ));
        return;
    };

    match kind {
        "array" => match property.get("items") {
            Some(items) => check_property(items, &format!("{path}.items"), problems),
            None => problems.push(format!(
                "Array property \"{path}\" must have an \"items\" definition"
            )),
        },
        "object" => {
            if let Some(children) = property.get("properties").and_then(Value::as_object) {
                for (name, child) in children {
                    check_property(child, &format!("{path}.{name}"), problems);
                }
            }
        }
        _ => {}
    }
}

fn is_valid_type(kind: &str) -> bool {
    matches!(
        kind,
        "string" | "number" | "integer" | "boolean" | "array" | "object"
    )
}
