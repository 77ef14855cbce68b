//! # Typed Schema Nodes
//!
//! Closed tagged union over the six node kinds the engine renders:
//! `string`, `number`, `integer`, `boolean`, `array`, `object`. Arbitrary
//! schema shapes are narrowed to this model at load time; anything the
//! model cannot express is rejected by the structural checks in
//! [`crate::document`], never discovered mid-render.
//!
//! Object nodes may carry a conditional triple (`if`/`then`/`else`). The
//! `if` predicate is restricted to per-property `const`/`enum`/presence
//! checks; `then`/`else` are partial object schemas merged in by the
//! resolver.
//!
//! Property maps are [`IndexMap`]s: declared order drives rendering order
//! and must survive serialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A schema node, discriminated by its `type` keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaNode {
    String(StringSchema),
    Number(NumberSchema),
    Integer(IntegerSchema),
    Boolean(BooleanSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
}

/// `type: string` — free text, closed choice, or a formatted flavor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StringSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

/// `type: number`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

/// `type: integer` — validated as an integer, rendered with step 1.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntegerSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

/// `type: boolean`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BooleanSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `type: array` — homogeneous rows described by `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Box<SchemaNode>,
    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
}

/// `type: object` — named children plus the optional conditional triple.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<PredicateSchema>,
    #[serde(rename = "then", default, skip_serializing_if = "Option::is_none")]
    pub then_branch: Option<BranchSchema>,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_branch: Option<BranchSchema>,
}

/// The `if` predicate: per-property checks, ANDed together.
///
/// `properties: None` (the key missing entirely) never matches. An empty
/// map is a vacuous AND and always matches — both shapes occur in the
/// wild and they are deliberately distinct here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredicateSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, PredicateCheck>>,
}

/// One predicate entry: `const` equality, `enum` membership, or — with
/// neither — a presence check (defined, non-null, non-empty-string).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredicateCheck {
    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
}

/// A `then`/`else` branch: partial properties and extra requireds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BranchSchema {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl SchemaNode {
    /// Human label for the node, when the author supplied one.
    pub fn title(&self) -> Option<&str> {
        match self {
            SchemaNode::String(s) => s.title.as_deref(),
            SchemaNode::Number(s) => s.title.as_deref(),
            SchemaNode::Integer(s) => s.title.as_deref(),
            SchemaNode::Boolean(s) => s.title.as_deref(),
            SchemaNode::Array(s) => s.title.as_deref(),
            SchemaNode::Object(s) => s.title.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaNode::String(s) => s.description.as_deref(),
            SchemaNode::Number(s) => s.description.as_deref(),
            SchemaNode::Integer(s) => s.description.as_deref(),
            SchemaNode::Boolean(s) => s.description.as_deref(),
            SchemaNode::Array(s) => s.description.as_deref(),
            SchemaNode::Object(s) => s.description.as_deref(),
        }
    }

    /// The `type` keyword value for this node.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::String(_) => "string",
            SchemaNode::Number(_) => "number",
            SchemaNode::Integer(_) => "integer",
            SchemaNode::Boolean(_) => "boolean",
            SchemaNode::Array(_) => "array",
            SchemaNode::Object(_) => "object",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            SchemaNode::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl ObjectSchema {
    /// Serialize as a standalone schema document value, with the `type`
    /// tag restored — the shape the validation engine consumes.
    pub fn to_schema_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(SchemaNode::Object(self.clone()))
    }
}
