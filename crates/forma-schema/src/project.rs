//! # Error Projection
//!
//! Translates raw validator errors into the flat `{field, message}` list
//! the form surfaces. Three concerns live here:
//!
//! - **Addressing** — instance pointers become dotted paths (`/a/b` →
//!   `a.b`); `required` errors are rewritten to point at the *missing*
//!   field (`parent.missing`), not its parent.
//! - **Wording** — one fixed template per keyword; `required` messages
//!   lead with the field's schema title when one exists.
//! - **Noise control** — raw `if`-keyword artifacts are dropped (the
//!   resolver already picked the branch), and identical `(field, message)`
//!   pairs collapse to their first occurrence, since a retained
//!   conditional triple re-reports branch requireds the resolver already
//!   merged top-level.

use crate::node::ObjectSchema;
use crate::validate::{RawError, RawErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field-addressed validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted/bracketed field path, or `root` for whole-document errors.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

/// Project raw engine errors into field errors.
///
/// Output order follows input order, minus suppressed entries and
/// duplicates.
pub fn project_errors(raw: &[RawError], schema: &ObjectSchema) -> Vec<FieldError> {
    let mut projected: Vec<FieldError> = Vec::new();
    for error in raw {
        if is_conditional_artifact(error) {
            continue;
        }
        let entry = FieldError {
            field: field_address(error),
            message: synthesize_message(error, schema),
        };
        if !projected.contains(&entry) {
            projected.push(entry);
        }
    }
    projected
}

/// Raw errors attributed to the `if` keyword itself carry no user-facing
/// information; branch selection already happened in the resolver.
fn is_conditional_artifact(error: &RawError) -> bool {
    error.kind.keyword() == "if"
        || error.schema_path == "/if"
        || error.schema_path.starts_with("/if/")
}

fn field_address(error: &RawError) -> String {
    let parent = error.instance_path.strip_prefix('/').map(normalize);
    match &error.kind {
        RawErrorKind::Required { property } => match parent {
            Some(parent) => format!("{parent}.{property}"),
            None => property.clone(),
        },
        _ => parent.unwrap_or_else(|| "root".to_string()),
    }
}

/// Pointer separators become dots; bracketed indexes pass through as-is.
fn normalize(pointer_tail: &str) -> String {
    pointer_tail.replace('/', ".")
}

fn synthesize_message(error: &RawError, schema: &ObjectSchema) -> String {
    match &error.kind {
        RawErrorKind::Required { property } => {
            format!("{} is required", field_title(schema, property))
        }
        RawErrorKind::MinLength { limit } => {
            format!("Must be at least {limit} characters")
        }
        RawErrorKind::MaxLength { limit } => {
            format!("Must be no more than {limit} characters")
        }
        RawErrorKind::Minimum { limit } => format!("Must be at least {}", literal(limit)),
        RawErrorKind::Maximum { limit } => {
            format!("Must be no more than {}", literal(limit))
        }
        RawErrorKind::MinItems { limit } => {
            format!("Must have at least {limit} items")
        }
        RawErrorKind::MaxItems { limit } => {
            format!("Must have no more than {limit} items")
        }
        RawErrorKind::Pattern => "Invalid format".to_string(),
        RawErrorKind::Enum { options } => format!(
            "Must be one of: {}",
            options.iter().map(literal).collect::<Vec<_>>().join(", ")
        ),
        RawErrorKind::Type { expected } => format!("Must be a {expected}"),
        RawErrorKind::Format { format } => format!("Invalid {format} format"),
        RawErrorKind::Other { .. } => {
            if error.message.is_empty() {
                "Invalid value".to_string()
            } else {
                error.message.clone()
            }
        }
    }
}

/// Literal display for enum options and numeric limits: strings appear
/// bare (no quotes), everything else as its JSON form.
fn literal(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Walk the schema `properties` chain along a dotted path and return the
/// `title` of the node it lands on; falls back to the path itself.
fn field_title(schema: &ObjectSchema, path: &str) -> String {
    let mut current = schema;
    let mut parts = path.split('.').peekable();
    while let Some(part) = parts.next() {
        let Some(child) = current.properties.get(part) else {
            return path.to_string();
        };
        if parts.peek().is_none() {
            return child.title().unwrap_or(path).to_string();
        }
        match child.as_object() {
            Some(object) => current = object,
            None => return path.to_string(),
        }
    }
    path.to_string()
}
