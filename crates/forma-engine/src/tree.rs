//! # Field Tree
//!
//! Recursive projection of an effective schema plus the current form data
//! into renderable field nodes. The tree is a pure function of its inputs:
//! building it never writes defaults into the data, it only decides what
//! each widget *displays* for a missing value.
//!
//! ## Widget Mapping
//!
//! ```text
//! boolean            ──▶ Toggle
//! number / integer   ──▶ NumberInput (integer forces whole steps)
//! string + enum      ──▶ Select (declared order, blank unselected row)
//! string + email     ──▶ TextInput (email flavored)
//! string             ──▶ TextInput
//! object             ──▶ Group (one child node per property)
//! array              ──▶ Repeater (one row per element)
//! ```
//!
//! ## Paths
//!
//! Object nesting joins with `.`; array rows display as `name[index]`.
//! A row's *touch* path collapses to the array's own path, so blurring
//! any row marks the whole array touched.

use forma_core::FormData;
use forma_schema::{ArraySchema, ObjectSchema, SchemaNode};
use serde::Serialize;
use serde_json::{Map, Number, Value};

// ─── Render Nodes ────────────────────────────────────────────────────

/// Complete renderable projection of a form session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    /// Root schema title.
    pub title: String,
    /// Root schema description, when present.
    pub description: Option<String>,
    /// Top-level field nodes in schema-declared order.
    pub fields: Vec<FieldNode>,
    /// Whether a submit is in flight (re-submission is disabled).
    pub submitting: bool,
}

/// One renderable field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldNode {
    /// Full dotted/bracketed path of the field within the form data.
    pub path: String,
    /// Last path segment: the property name, or `name[index]` for rows.
    pub name: String,
    /// Display label: the schema `title`, falling back to the name.
    pub label: String,
    /// Schema `description`, when present.
    pub description: Option<String>,
    /// Whether the *parent* schema lists this field as required.
    pub required: bool,
    /// Error surfaced under the field, already gated on touch state.
    pub error: Option<String>,
    /// Path recorded in the touched set when this field blurs.
    pub touch_path: String,
    /// The editable widget.
    pub widget: Widget,
}

/// The editable widget for a field, by schema kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    /// Boolean checkbox.
    Toggle {
        /// Current state; an absent value renders unchecked.
        checked: bool,
    },
    /// Numeric input. `None` renders the empty unset sentinel, which is
    /// distinct from `0`.
    NumberInput {
        value: Option<Number>,
        minimum: Option<Number>,
        maximum: Option<Number>,
        /// Integer kind forces whole-number steps.
        integer: bool,
    },
    /// Closed-choice selector over an `enum`, plus a blank unselected row.
    Select {
        /// Currently selected option, empty when unselected.
        selected: String,
        /// Allowed options in schema-declared order.
        options: Vec<String>,
    },
    /// Free text input.
    TextInput {
        value: String,
        /// Email-flavored when the schema format is `email`.
        email: bool,
        min_length: Option<u64>,
        max_length: Option<u64>,
        pattern: Option<String>,
    },
    /// Nested object: one child node per property.
    Group { children: Vec<FieldNode> },
    /// Editable array of rows.
    Repeater {
        rows: Vec<FieldNode>,
        /// Whether append is allowed; false once `maxItems` is reached.
        can_add: bool,
        min_items: Option<u64>,
        max_items: Option<u64>,
        /// Advisory sub-minimum flag; never blocks edits.
        below_min: bool,
    },
}

// ─── Tree Construction ───────────────────────────────────────────────

/// Build the top-level field nodes for an effective schema.
///
/// `error_for` resolves the error to display for a given path; the
/// session passes its touch-gated lookup here. Repeater rows never
/// consult it, element errors surface on the array node instead.
pub fn field_nodes(
    schema: &ObjectSchema,
    data: &FormData,
    error_for: &dyn Fn(&str) -> Option<String>,
) -> Vec<FieldNode> {
    schema
        .properties
        .iter()
        .map(|(name, node)| {
            node_for(
                name.clone(),
                name.clone(),
                name.clone(),
                node,
                data.get_key(name),
                schema.required.iter().any(|r| r == name),
                Some(error_for),
            )
        })
        .collect()
}

fn node_for(
    name: String,
    path: String,
    touch_path: String,
    schema: &SchemaNode,
    value: Option<&Value>,
    required: bool,
    errors: Option<&dyn Fn(&str) -> Option<String>>,
) -> FieldNode {
    let widget = match schema {
        SchemaNode::Boolean(_) => Widget::Toggle {
            checked: matches!(value, Some(Value::Bool(true))),
        },
        SchemaNode::Number(number) => Widget::NumberInput {
            value: numeric_value(value),
            minimum: number.minimum.clone(),
            maximum: number.maximum.clone(),
            integer: false,
        },
        SchemaNode::Integer(integer) => Widget::NumberInput {
            value: numeric_value(value),
            minimum: integer.minimum.clone(),
            maximum: integer.maximum.clone(),
            integer: true,
        },
        SchemaNode::String(string) => match &string.enum_values {
            Some(options) => Widget::Select {
                selected: display_value(value),
                options: options.iter().map(option_label).collect(),
            },
            None => Widget::TextInput {
                value: display_value(value),
                email: string.format.as_deref() == Some("email"),
                min_length: string.min_length,
                max_length: string.max_length,
                pattern: string.pattern.clone(),
            },
        },
        SchemaNode::Object(object) => Widget::Group {
            children: object_children(object, value, &path, errors),
        },
        SchemaNode::Array(array) => repeater(array, value, &path, &name),
    };
    FieldNode {
        error: errors.and_then(|lookup| lookup(&path)),
        label: schema.title().unwrap_or(&name).to_string(),
        description: schema.description().map(str::to_string),
        name,
        path,
        touch_path,
        required,
        widget,
    }
}

fn object_children(
    object: &ObjectSchema,
    value: Option<&Value>,
    prefix: &str,
    errors: Option<&dyn Fn(&str) -> Option<String>>,
) -> Vec<FieldNode> {
    object
        .properties
        .iter()
        .map(|(child_name, child_schema)| {
            let child_path = format!("{prefix}.{child_name}");
            node_for(
                child_name.clone(),
                child_path.clone(),
                child_path,
                child_schema,
                value.and_then(|v| v.get(child_name)),
                object.required.iter().any(|r| r == child_name),
                errors,
            )
        })
        .collect()
}

fn repeater(array: &ArraySchema, value: Option<&Value>, path: &str, name: &str) -> Widget {
    let elements: &[Value] = match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    };
    let rows = elements
        .iter()
        .enumerate()
        .map(|(index, row_value)| {
            node_for(
                format!("{name}[{index}]"),
                format!("{path}[{index}]"),
                path.to_string(),
                &array.items,
                Some(row_value),
                false,
                None,
            )
        })
        .collect();
    let len = elements.len() as u64;
    Widget::Repeater {
        rows,
        can_add: array.max_items.map_or(true, |max| len < max),
        min_items: array.min_items,
        max_items: array.max_items,
        below_min: array.min_items.is_some_and(|min| len < min),
    }
}

// ─── Display & Default Values ────────────────────────────────────────

/// Numeric display value. Both an absent value and the empty-string
/// sentinel render as an empty input.
fn numeric_value(value: Option<&Value>) -> Option<Number> {
    match value {
        Some(Value::Number(number)) => Some(number.clone()),
        _ => None,
    }
}

/// Text display value; missing and non-scalar values render empty.
fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

/// Select option label: strings appear bare, other literals in JSON form.
fn option_label(option: &Value) -> String {
    match option {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Fresh value synthesized for a newly appended array row.
pub fn zero_value(schema: &SchemaNode) -> Value {
    match schema {
        SchemaNode::Boolean(_) => Value::Bool(false),
        SchemaNode::Number(_) | SchemaNode::Integer(_) => Value::from(0),
        SchemaNode::Object(_) => Value::Object(Map::new()),
        SchemaNode::Array(_) => Value::Array(Vec::new()),
        SchemaNode::String(_) => Value::String(String::new()),
    }
}

// ─── Path Enumeration ────────────────────────────────────────────────

/// Every field path reachable in the schema: all properties, recursing
/// through nested objects. Array elements are not enumerated, their
/// array's own path covers them.
pub fn field_paths(schema: &ObjectSchema) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(schema, "", &mut paths);
    paths
}

fn collect_paths(schema: &ObjectSchema, prefix: &str, out: &mut Vec<String>) {
    for (name, node) in &schema.properties {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        out.push(path.clone());
        if let SchemaNode::Object(child) = node {
            collect_paths(child, &path, out);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use forma_schema::SchemaDocument;
    use serde_json::json;

    fn schema(raw: Value) -> ObjectSchema {
        SchemaDocument::from_value(raw).unwrap().root().clone()
    }

    fn data(raw: Value) -> FormData {
        FormData::from_value(raw).unwrap()
    }

    fn no_errors(_: &str) -> Option<String> {
        None
    }

    fn find<'a>(fields: &'a [FieldNode], name: &str) -> &'a FieldNode {
        fields
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("no field named {name}"))
    }

    // ── Scalar widgets ───────────────────────────────────────────────

    #[test]
    fn test_boolean_renders_toggle_defaulting_unchecked() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {"subscribed": {"type": "boolean", "title": "Subscribed"}}
        }));
        let fields = field_nodes(&schema, &data(json!({})), &no_errors);
        assert_eq!(fields[0].widget, Widget::Toggle { checked: false });

        let fields = field_nodes(&schema, &data(json!({"subscribed": true})), &no_errors);
        assert_eq!(fields[0].widget, Widget::Toggle { checked: true });
    }

    #[test]
    fn test_number_without_value_renders_empty_not_zero() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {"age": {"type": "integer", "minimum": 18}}
        }));
        let fields = field_nodes(&schema, &data(json!({})), &no_errors);
        match &fields[0].widget {
            Widget::NumberInput {
                value,
                minimum,
                integer,
                ..
            } => {
                assert_eq!(*value, None);
                assert_eq!(*minimum, Some(Number::from(18)));
                assert!(*integer);
            }
            other => panic!("expected NumberInput, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_string_sentinel_renders_empty_number_input() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {"age": {"type": "number"}}
        }));
        let fields = field_nodes(&schema, &data(json!({"age": ""})), &no_errors);
        match &fields[0].widget {
            Widget::NumberInput { value, .. } => assert_eq!(*value, None),
            other => panic!("expected NumberInput, got {other:?}"),
        }
    }

    #[test]
    fn test_string_enum_renders_select_in_declared_order() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {"color": {"type": "string", "enum": ["red", "green", "blue"]}}
        }));
        let fields = field_nodes(&schema, &data(json!({})), &no_errors);
        assert_eq!(
            fields[0].widget,
            Widget::Select {
                selected: String::new(),
                options: vec!["red".into(), "green".into(), "blue".into()],
            }
        );
    }

    #[test]
    fn test_email_format_flavors_text_input() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {
                "contact": {"type": "string", "format": "email"},
                "note": {"type": "string", "minLength": 1}
            }
        }));
        let fields = field_nodes(&schema, &data(json!({})), &no_errors);
        match &find(&fields, "contact").widget {
            Widget::TextInput { email, .. } => assert!(*email),
            other => panic!("expected TextInput, got {other:?}"),
        }
        match &find(&fields, "note").widget {
            Widget::TextInput {
                email, min_length, ..
            } => {
                assert!(!*email);
                assert_eq!(*min_length, Some(1));
            }
            other => panic!("expected TextInput, got {other:?}"),
        }
    }

    #[test]
    fn test_label_falls_back_to_property_name() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {
                "email": {"type": "string", "title": "Email Address"},
                "nickname": {"type": "string"}
            },
            "required": ["email"]
        }));
        let fields = field_nodes(&schema, &data(json!({})), &no_errors);
        let email = find(&fields, "email");
        assert_eq!(email.label, "Email Address");
        assert!(email.required);
        let nickname = find(&fields, "nickname");
        assert_eq!(nickname.label, "nickname");
        assert!(!nickname.required);
    }

    // ── Nested objects ───────────────────────────────────────────────

    #[test]
    fn test_nested_children_render_zero_values_without_container() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {
                "address": {
                    "type": "object",
                    "properties": {
                        "street": {"type": "string"},
                        "verified": {"type": "boolean"}
                    },
                    "required": ["street"]
                }
            }
        }));
        let fields = field_nodes(&schema, &data(json!({})), &no_errors);
        let Widget::Group { children } = &fields[0].widget else {
            panic!("expected Group");
        };
        let street = find(children, "street");
        assert_eq!(street.path, "address.street");
        assert!(street.required);
        assert_eq!(
            street.widget,
            Widget::TextInput {
                value: String::new(),
                email: false,
                min_length: None,
                max_length: None,
                pattern: None,
            }
        );
        assert_eq!(
            find(children, "verified").widget,
            Widget::Toggle { checked: false }
        );
    }

    // ── Repeaters ────────────────────────────────────────────────────

    #[test]
    fn test_repeater_rows_collapse_touch_path_to_the_array() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }));
        let fields = field_nodes(&schema, &data(json!({"tags": ["a", "b"]})), &no_errors);
        let Widget::Repeater { rows, can_add, .. } = &fields[0].widget else {
            panic!("expected Repeater");
        };
        assert!(*can_add);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "tags[0]");
        assert_eq!(rows[1].path, "tags[1]");
        assert_eq!(rows[0].touch_path, "tags");
        assert_eq!(rows[1].touch_path, "tags");
    }

    #[test]
    fn test_add_disabled_at_max_items() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}, "maxItems": 2}
            }
        }));
        let fields = field_nodes(&schema, &data(json!({"tags": ["a", "b"]})), &no_errors);
        let Widget::Repeater { can_add, .. } = &fields[0].widget else {
            panic!("expected Repeater");
        };
        assert!(!*can_add);
    }

    #[test]
    fn test_below_min_is_advisory_only() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}, "minItems": 1}
            }
        }));
        let fields = field_nodes(&schema, &data(json!({})), &no_errors);
        let Widget::Repeater {
            rows,
            below_min,
            can_add,
            ..
        } = &fields[0].widget
        else {
            panic!("expected Repeater");
        };
        assert!(rows.is_empty());
        assert!(*below_min);
        assert!(*can_add);
    }

    #[test]
    fn test_errors_attach_to_nodes_but_never_rows() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }));
        let lookup = |path: &str| {
            if path == "tags" {
                Some("Must have at least 2 items".to_string())
            } else {
                Some("should never attach".to_string())
            }
        };
        let fields = field_nodes(&schema, &data(json!({"tags": ["a"]})), &lookup);
        assert_eq!(fields[0].error.as_deref(), Some("Must have at least 2 items"));
        let Widget::Repeater { rows, .. } = &fields[0].widget else {
            panic!("expected Repeater");
        };
        assert_eq!(rows[0].error, None);
    }

    // ── Defaults & paths ─────────────────────────────────────────────

    #[test]
    fn test_zero_value_by_item_kind() {
        let string_items = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {"a": {"type": "array", "items": {"type": "string"}}}
        }));
        let SchemaNode::Array(array) = &string_items.properties["a"] else {
            panic!("expected array");
        };
        assert_eq!(zero_value(&array.items), json!(""));

        let object_items: SchemaNode =
            serde_json::from_value(json!({"type": "object", "properties": {}})).unwrap();
        assert_eq!(zero_value(&object_items), json!({}));

        let boolean: SchemaNode = serde_json::from_value(json!({"type": "boolean"})).unwrap();
        assert_eq!(zero_value(&boolean), json!(false));

        let integer: SchemaNode = serde_json::from_value(json!({"type": "integer"})).unwrap();
        assert_eq!(zero_value(&integer), json!(0));
    }

    #[test]
    fn test_field_paths_recurse_objects_but_not_arrays() {
        let schema = schema(json!({
            "type": "object",
            "title": "T",
            "properties": {
                "name": {"type": "string"},
                "address": {
                    "type": "object",
                    "properties": {
                        "street": {"type": "string"},
                        "geo": {
                            "type": "object",
                            "properties": {"lat": {"type": "number"}}
                        }
                    }
                },
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }));
        assert_eq!(
            field_paths(&schema),
            vec![
                "name",
                "address",
                "address.street",
                "address.geo",
                "address.geo.lat",
                "tags",
            ]
        );
    }
}
