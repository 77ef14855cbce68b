//! # Ordered Form Data
//!
//! The mutable value store behind a form session. Backed by
//! `serde_json::Map`, which keeps insertion order under the
//! `preserve_order` feature — rendering iterates fields in declared order,
//! and exported documents must round-trip key order byte-identically.

use crate::path::{FieldPath, Segment};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Form data: one JSON object, addressed by [`FieldPath`]s.
///
/// Values are scalars, nested objects, or arrays. A number field cleared in
/// the UI holds the empty string as its unset sentinel — `0` means an
/// entered zero, never "unset" — so no eager coercion happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(Map<String, Value>);

/// Error raised by path-addressed reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// Form data must be a JSON object at the root.
    #[error("form data must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
    /// A path step tried to traverse a value that is not a container of
    /// the required kind.
    #[error("cannot traverse {path}: not a container")]
    NotAContainer { path: String },
    /// An index step landed outside the array.
    #[error("index {index} out of bounds at {path} (length {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },
}

impl FormData {
    /// Empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, DataError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DataError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Snapshot as a JSON value (for validation and for the wire).
    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Consume into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Top-level field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Look up a top-level field.
    pub fn get_key(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Remove a top-level field, preserving the order of the rest.
    pub fn remove_key(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    /// Look up a value at an arbitrary path. Absent paths are `None`, as
    /// are paths that descend through the wrong container kind.
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = self.0.get(path.top_level())?;
        for segment in path.tail() {
            current = match segment {
                Segment::Key(name) => current.as_object()?.get(name)?,
                Segment::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }

    /// Write a value at an arbitrary path.
    ///
    /// Missing objects along the way are created. Arrays are never
    /// implicitly grown except by writing at exactly `len` (append);
    /// anything past that is out of bounds. Traversing through an
    /// existing scalar is an error, not a silent overwrite.
    pub fn set(&mut self, path: &FieldPath, value: Value) -> Result<(), DataError> {
        let Some((last, intermediate)) = path.tail().split_last() else {
            self.0.insert(path.top_level().to_string(), value);
            return Ok(());
        };

        let created = match path.tail().first() {
            Some(Segment::Index(_)) => Value::Array(Vec::new()),
            _ => Value::Object(Map::new()),
        };
        let mut current = self
            .0
            .entry(path.top_level().to_string())
            .or_insert(created);
        let mut trace = path.top_level().to_string();

        for segment in intermediate {
            current = step_into(current, segment, &mut trace)?;
        }

        match last {
            Segment::Key(name) => {
                let Value::Object(map) = current else {
                    return Err(DataError::NotAContainer { path: trace });
                };
                map.insert(name.clone(), value);
            }
            Segment::Index(index) => {
                let Value::Array(items) = current else {
                    return Err(DataError::NotAContainer { path: trace });
                };
                if *index < items.len() {
                    items[*index] = value;
                } else if *index == items.len() {
                    items.push(value);
                } else {
                    return Err(DataError::IndexOutOfBounds {
                        path: trace,
                        index: *index,
                        len: items.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Descend one intermediate segment, creating missing objects on the way.
fn step_into<'a>(
    current: &'a mut Value,
    segment: &Segment,
    trace: &mut String,
) -> Result<&'a mut Value, DataError> {
    match segment {
        Segment::Key(name) => {
            let Value::Object(map) = current else {
                return Err(DataError::NotAContainer {
                    path: trace.clone(),
                });
            };
            trace.push('.');
            trace.push_str(name);
            Ok(map
                .entry(name.clone())
                .or_insert_with(|| Value::Object(Map::new())))
        }
        Segment::Index(index) => {
            let Value::Array(items) = current else {
                return Err(DataError::NotAContainer {
                    path: trace.clone(),
                });
            };
            use std::fmt::Write as _;
            let _ = write!(trace, "[{index}]");
            let len = items.len();
            items.get_mut(*index).ok_or(DataError::IndexOutOfBounds {
                path: trace.clone(),
                index: *index,
                len,
            })
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn set_and_get_top_level() {
        let mut data = FormData::new();
        data.set(&path("name"), json!("admin")).unwrap();
        assert_eq!(data.get_key("name"), Some(&json!("admin")));
        assert_eq!(data.get(&path("name")), Some(&json!("admin")));
    }

    #[test]
    fn set_creates_intermediate_objects() {
        let mut data = FormData::new();
        data.set(&path("address.street"), json!("Main St")).unwrap();
        assert_eq!(
            data.as_value(),
            json!({"address": {"street": "Main St"}})
        );
    }

    #[test]
    fn set_replaces_existing_array_element() {
        let mut data = FormData::from_value(json!({"tags": ["a", "b"]})).unwrap();
        data.set(&path("tags[1]"), json!("z")).unwrap();
        assert_eq!(data.as_value(), json!({"tags": ["a", "z"]}));
    }

    #[test]
    fn set_at_len_appends() {
        let mut data = FormData::from_value(json!({"tags": ["a"]})).unwrap();
        data.set(&path("tags[1]"), json!("b")).unwrap();
        assert_eq!(data.as_value(), json!({"tags": ["a", "b"]}));
    }

    #[test]
    fn set_past_len_is_out_of_bounds() {
        let mut data = FormData::from_value(json!({"tags": ["a"]})).unwrap();
        let err = data.set(&path("tags[3]"), json!("x")).unwrap_err();
        assert_eq!(
            err,
            DataError::IndexOutOfBounds {
                path: "tags".into(),
                index: 3,
                len: 1,
            }
        );
    }

    #[test]
    fn set_through_scalar_is_rejected() {
        let mut data = FormData::from_value(json!({"name": "x"})).unwrap();
        let err = data.set(&path("name.deep"), json!(1)).unwrap_err();
        assert_eq!(err, DataError::NotAContainer { path: "name".into() });
    }

    #[test]
    fn nested_row_write() {
        let mut data =
            FormData::from_value(json!({"contacts": [{"email": "a@b.c"}]})).unwrap();
        data.set(&path("contacts[0].email"), json!("x@y.z")).unwrap();
        assert_eq!(
            data.get(&path("contacts[0].email")),
            Some(&json!("x@y.z"))
        );
    }

    #[test]
    fn remove_key_preserves_order() {
        let mut data =
            FormData::from_value(json!({"a": 1, "b": 2, "c": 3})).unwrap();
        data.remove_key("b");
        let keys: Vec<&str> = data.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        let err = FormData::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err, DataError::NotAnObject { found: "array" });
    }

    #[test]
    fn get_through_wrong_kind_is_none() {
        let data = FormData::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(data.get(&path("name[0]")), None);
    }
}
