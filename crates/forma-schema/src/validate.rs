//! # Schema Validation
//!
//! Wraps the `jsonschema` crate (Draft 2020-12) behind a small, explicit
//! surface: build a validator for one effective schema, collect *all*
//! raw errors for a data instance, and hand them to the projector.
//!
//! Validators are built per call. Form schemas are small, compilation is
//! cheap, and the effective schema changes with the data anyway — there
//! is deliberately no process-wide validator cache.
//!
//! ## Determinism
//!
//! `iter_errors` walks the compiled schema in a stable order, so the same
//! `(schema, data)` pair always produces the same ordered error list.

use crate::node::ObjectSchema;
use crate::project::{self, FieldError};
use forma_core::FormData;
use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::{Draft, Validator};
use serde_json::Value;

/// A compiled validator for one effective schema.
#[derive(Debug)]
pub struct SchemaValidator {
    validator: Validator,
}

/// Error raised while constructing a validator.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// The schema itself was rejected by the validation engine.
    #[error("failed to build validator: {reason}")]
    Build { reason: String },
    /// The typed schema did not serialize back to JSON.
    #[error("schema does not serialize to JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One raw engine error, owned and decoupled from validator lifetimes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawError {
    /// JSON pointer into the data instance (empty at the root).
    pub instance_path: String,
    /// JSON pointer into the schema that raised the error.
    pub schema_path: String,
    /// The engine's own human-readable message.
    pub message: String,
    /// Keyword-specific parameters.
    pub kind: RawErrorKind,
}

/// The keyword that failed, with the parameters message synthesis needs.
#[derive(Debug, Clone, PartialEq)]
pub enum RawErrorKind {
    Required { property: String },
    MinLength { limit: u64 },
    MaxLength { limit: u64 },
    Minimum { limit: Value },
    Maximum { limit: Value },
    MinItems { limit: u64 },
    MaxItems { limit: u64 },
    Pattern,
    Enum { options: Vec<Value> },
    Type { expected: String },
    Format { format: String },
    Other { keyword: String },
}

impl RawErrorKind {
    /// The schema keyword this error belongs to.
    pub fn keyword(&self) -> &str {
        match self {
            RawErrorKind::Required { .. } => "required",
            RawErrorKind::MinLength { .. } => "minLength",
            RawErrorKind::MaxLength { .. } => "maxLength",
            RawErrorKind::Minimum { .. } => "minimum",
            RawErrorKind::Maximum { .. } => "maximum",
            RawErrorKind::MinItems { .. } => "minItems",
            RawErrorKind::MaxItems { .. } => "maxItems",
            RawErrorKind::Pattern => "pattern",
            RawErrorKind::Enum { .. } => "enum",
            RawErrorKind::Type { .. } => "type",
            RawErrorKind::Format { .. } => "format",
            RawErrorKind::Other { keyword } => keyword,
        }
    }
}

impl SchemaValidator {
    /// Compile a validator for a raw schema value.
    ///
    /// All-errors mode is implicit (`iter_errors` never stops early) and
    /// format assertions are on, matching the engine configuration the
    /// rest of the pipeline assumes.
    pub fn for_schema(schema: &Value) -> Result<Self, ValidatorError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| ValidatorError::Build {
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Compile a validator for a typed effective schema.
    pub fn for_object(schema: &ObjectSchema) -> Result<Self, ValidatorError> {
        let value = schema.to_schema_value()?;
        Self::for_schema(&value)
    }

    /// Collect every raw error for `instance`, in engine order.
    pub fn raw_errors(&self, instance: &Value) -> Vec<RawError> {
        self.validator
            .iter_errors(instance)
            .map(|e| RawError {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
                kind: raw_kind(&e.kind, &e.schema_path.to_string()),
            })
            .collect()
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

/// Validate form data against an effective schema and project the result.
///
/// This is the full validation pass the session runs: compile, collect,
/// project. It fails soft — if the effective schema cannot even be
/// compiled, the pass reports the single root fallback error instead of
/// surfacing a fault.
pub fn validate_form_data(schema: &ObjectSchema, data: &FormData) -> Vec<FieldError> {
    let instance = data.as_value();
    match SchemaValidator::for_object(schema) {
        Ok(validator) => project::project_errors(&validator.raw_errors(&instance), schema),
        Err(error) => {
            tracing::warn!(%error, "validator construction failed; reporting fallback error");
            vec![FieldError {
                field: "root".to_string(),
                message: "Validation failed".to_string(),
            }]
        }
    }
}

fn raw_kind(kind: &ValidationErrorKind, schema_path: &str) -> RawErrorKind {
    match kind {
        ValidationErrorKind::Required { property } => RawErrorKind::Required {
            property: property
                .as_str()
                .map(str::to_owned)
                .unwrap_or_else(|| property.to_string()),
        },
        ValidationErrorKind::MinLength { limit } => RawErrorKind::MinLength { limit: *limit },
        ValidationErrorKind::MaxLength { limit } => RawErrorKind::MaxLength { limit: *limit },
        ValidationErrorKind::Minimum { limit } => RawErrorKind::Minimum {
            limit: limit.clone(),
        },
        ValidationErrorKind::Maximum { limit } => RawErrorKind::Maximum {
            limit: limit.clone(),
        },
        ValidationErrorKind::MinItems { limit } => RawErrorKind::MinItems { limit: *limit },
        ValidationErrorKind::MaxItems { limit } => RawErrorKind::MaxItems { limit: *limit },
        ValidationErrorKind::Pattern { .. } => RawErrorKind::Pattern,
        ValidationErrorKind::Enum { options } => RawErrorKind::Enum {
            options: options.as_array().cloned().unwrap_or_default(),
        },
        ValidationErrorKind::Type { kind } => RawErrorKind::Type {
            expected: type_name(kind),
        },
        ValidationErrorKind::Format { format } => RawErrorKind::Format {
            format: format.clone(),
        },
        _ => RawErrorKind::Other {
            keyword: last_schema_segment(schema_path),
        },
    }
}

fn type_name(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Single(kind) => kind.to_string(),
        TypeKind::Multiple(kinds) => (*kinds)
            .into_iter()
            .map(|kind| kind.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// The last segment of a schema pointer names the keyword that failed.
fn last_schema_segment(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SchemaDocument;
    use serde_json::json;

    fn schema(raw: Value) -> ObjectSchema {
        SchemaDocument::from_value(raw).unwrap().root().clone()
    }

    fn contact_schema() -> ObjectSchema {
        schema(json!({
            "type": "object",
            "title": "Contact",
            "properties": {
                "name": {"type": "string", "minLength": 2},
                "age": {"type": "integer", "minimum": 18},
                "email": {"type": "string", "format": "email"},
                "tags": {"type": "array", "items": {"type": "string"}, "minItems": 1}
            },
            "required": ["name"]
        }))
    }

    fn raw_for(schema: &ObjectSchema, instance: Value) -> Vec<RawError> {
        SchemaValidator::for_object(schema)
            .unwrap()
            .raw_errors(&instance)
    }

    #[test]
    fn valid_instance_produces_no_errors() {
        let schema = contact_schema();
        let instance = json!({
            "name": "Ada",
            "age": 30,
            "email": "ada@example.com",
            "tags": ["ok"]
        });
        assert!(raw_for(&schema, instance).is_empty());
    }

    #[test]
    fn missing_required_is_reported_with_property_name() {
        let schema = contact_schema();
        let errors = raw_for(&schema, json!({}));
        assert!(errors.iter().any(|e| matches!(
            &e.kind,
            RawErrorKind::Required { property } if property == "name"
        )));
    }

    #[test]
    fn constraint_keywords_carry_their_limits() {
        let schema = contact_schema();
        let errors = raw_for(
            &schema,
            json!({"name": "A", "age": 7, "tags": []}),
        );
        assert!(errors
            .iter()
            .any(|e| e.kind == RawErrorKind::MinLength { limit: 2 }));
        assert!(errors
            .iter()
            .any(|e| e.kind == RawErrorKind::Minimum { limit: json!(18) }));
        assert!(errors
            .iter()
            .any(|e| e.kind == RawErrorKind::MinItems { limit: 1 }));
    }

    #[test]
    fn format_assertions_are_enabled() {
        let schema = contact_schema();
        let errors = raw_for(&schema, json!({"name": "Ada", "email": "not-an-email"}));
        assert!(errors.iter().any(|e| matches!(
            &e.kind,
            RawErrorKind::Format { format } if format == "email"
        )));
    }

    #[test]
    fn type_mismatch_names_the_expected_type() {
        let schema = contact_schema();
        let errors = raw_for(&schema, json!({"name": "Ada", "age": ""}));
        assert!(errors.iter().any(|e| matches!(
            &e.kind,
            RawErrorKind::Type { expected } if expected == "integer"
        )));
    }

    #[test]
    fn instance_paths_are_json_pointers() {
        let schema = contact_schema();
        let errors = raw_for(&schema, json!({"name": "Ada", "tags": [7]}));
        let type_error = errors
            .iter()
            .find(|e| matches!(e.kind, RawErrorKind::Type { .. }))
            .expect("type error for tags[0]");
        assert_eq!(type_error.instance_path, "/tags/0");
    }

    #[test]
    fn identical_inputs_yield_identical_error_lists() {
        let schema = contact_schema();
        let instance = json!({"name": "", "age": 1, "tags": []});
        assert_eq!(raw_for(&schema, instance.clone()), raw_for(&schema, instance));
    }

    #[test]
    fn branch_required_surfaces_when_condition_holds() {
        let schema = schema(json!({
            "type": "object",
            "title": "Admin",
            "properties": {"name": {"type": "string"}},
            "required": ["name"],
            "if": {"properties": {"name": {"const": "admin"}}},
            "then": {"properties": {"pin": {"type": "string"}}, "required": ["pin"]}
        }));
        let errors = raw_for(&schema, json!({"name": "admin"}));
        assert!(errors.iter().any(|e| matches!(
            &e.kind,
            RawErrorKind::Required { property } if property == "pin"
        )));
    }
}
