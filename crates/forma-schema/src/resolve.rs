//! # Conditional Resolution
//!
//! Computes the *effective* schema: the base object schema with whichever
//! `then`/`else` branch the current data selects merged on top, and the
//! unselected branch's exclusive properties stripped out. The effective
//! schema is derived per pass and never stored — schema trees are small
//! and correctness beats memoization here.
//!
//! Resolution fails soft: anything the resolver cannot make sense of
//! yields the unmodified base schema, never an error to the caller. A
//! form must degrade to its unconditional shape rather than go blank.

use crate::node::{ObjectSchema, PredicateCheck, PredicateSchema};
use forma_core::FormData;
use serde_json::Value;

/// Resolve the effective schema for `base` under the current `data`.
///
/// Resolution is idempotent: the effective schema retains the conditional
/// triple, and re-resolving it against the same data reproduces it.
pub fn resolve(base: &ObjectSchema, data: &FormData) -> ObjectSchema {
    match resolve_branch(base, data) {
        Some(effective) => effective,
        None => base.clone(),
    }
}

fn resolve_branch(base: &ObjectSchema, data: &FormData) -> Option<ObjectSchema> {
    let condition = base.condition.as_ref()?;
    let satisfied = predicate_holds(condition, data);
    let (selected, unselected) = if satisfied {
        (base.then_branch.as_ref(), base.else_branch.as_ref())
    } else {
        (base.else_branch.as_ref(), base.then_branch.as_ref())
    };
    let selected = selected?;

    let mut effective = base.clone();
    // Branch properties override in place or append after the base keys,
    // so declared order survives the merge.
    for (name, node) in &selected.properties {
        effective.properties.insert(name.clone(), node.clone());
    }
    // Union, not concat: a name required by both base and branch appears
    // once, which keeps re-resolution from growing the list.
    for name in &selected.required {
        if !effective.required.contains(name) {
            effective.required.push(name.clone());
        }
    }
    // Strip what the unselected branch owns exclusively. A key the base
    // schema itself declares always stays.
    if let Some(other) = unselected {
        for name in other.properties.keys() {
            if !base.properties.contains_key(name) {
                effective.properties.shift_remove(name);
            }
        }
    }
    Some(effective)
}

/// Evaluate the `if` predicate against top-level data values.
///
/// All per-property checks must pass. A predicate without a `properties`
/// key never matches.
pub fn predicate_holds(condition: &PredicateSchema, data: &FormData) -> bool {
    let Some(checks) = condition.properties.as_ref() else {
        return false;
    };
    checks
        .iter()
        .all(|(name, check)| check_matches(check, data.get_key(name)))
}

fn check_matches(check: &PredicateCheck, value: Option<&Value>) -> bool {
    if let Some(expected) = &check.const_value {
        return value == Some(expected);
    }
    if let Some(allowed) = &check.enum_values {
        return value.is_some_and(|v| allowed.contains(v));
    }
    // Neither const nor enum: the field must be present with a real value.
    value.is_some_and(|v| !v.is_null() && v.as_str() != Some(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SchemaDocument;
    use serde_json::json;

    fn schema(raw: serde_json::Value) -> ObjectSchema {
        SchemaDocument::from_value(raw).unwrap().root().clone()
    }

    fn data(raw: serde_json::Value) -> FormData {
        FormData::from_value(raw).unwrap()
    }

    fn conditional_base() -> ObjectSchema {
        schema(json!({
            "type": "object",
            "title": "Account",
            "properties": {
                "role": {"type": "string", "enum": ["admin", "guest"]},
                "x": {"type": "string"}
            },
            "required": ["role"],
            "if": {"properties": {"role": {"const": "admin"}}},
            "then": {
                "properties": {
                    "x": {"type": "string", "title": "X (admin)"},
                    "y": {"type": "string"}
                },
                "required": ["y"]
            },
            "else": {
                "properties": {"z": {"type": "string"}}
            }
        }))
    }

    #[test]
    fn no_condition_returns_base_unchanged() {
        let base = schema(json!({
            "type": "object",
            "title": "Plain",
            "properties": {"name": {"type": "string"}}
        }));
        let effective = resolve(&base, &data(json!({"name": "x"})));
        assert_eq!(effective, base);
    }

    #[test]
    fn then_branch_merges_properties_and_required() {
        let base = conditional_base();
        let effective = resolve(&base, &data(json!({"role": "admin"})));
        let names: Vec<&str> = effective.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["role", "x", "y"]);
        assert_eq!(effective.required, vec!["role", "y"]);
        // Branch override replaced the base node in place.
        assert_eq!(
            effective.properties["x"].title(),
            Some("X (admin)")
        );
    }

    #[test]
    fn else_branch_strips_then_exclusive_properties() {
        let base = conditional_base();
        let effective = resolve(&base, &data(json!({"role": "guest"})));
        let names: Vec<&str> = effective.properties.keys().map(String::as_str).collect();
        // `y` belongs only to then; `x` is base-owned and stays.
        assert_eq!(names, vec!["role", "x", "z"]);
        assert_eq!(effective.required, vec!["role"]);
    }

    #[test]
    fn selected_branch_absent_returns_base() {
        let base = schema(json!({
            "type": "object",
            "title": "OnlyElse",
            "properties": {"flag": {"type": "boolean"}},
            "if": {"properties": {"flag": {"const": true}}},
            "else": {"properties": {"alt": {"type": "string"}}}
        }));
        // Predicate satisfied, `then` missing: base unchanged.
        let effective = resolve(&base, &data(json!({"flag": true})));
        assert_eq!(effective, base);
        // Predicate unsatisfied: the else branch applies.
        let effective = resolve(&base, &data(json!({"flag": false})));
        assert!(effective.properties.contains_key("alt"));
    }

    #[test]
    fn predicate_is_a_logical_and() {
        let base = schema(json!({
            "type": "object",
            "title": "And",
            "properties": {
                "a": {"type": "integer"},
                "b": {"type": "integer"}
            },
            "if": {"properties": {"a": {"const": 1}, "b": {"enum": [2, 3]}}},
            "then": {"properties": {"both": {"type": "string"}}}
        }));
        assert!(resolve(&base, &data(json!({"a": 1, "b": 2})))
            .properties
            .contains_key("both"));
        assert!(resolve(&base, &data(json!({"a": 1, "b": 3})))
            .properties
            .contains_key("both"));
        assert!(!resolve(&base, &data(json!({"a": 1, "b": 4})))
            .properties
            .contains_key("both"));
        assert!(!resolve(&base, &data(json!({"a": 2, "b": 2})))
            .properties
            .contains_key("both"));
    }

    #[test]
    fn bare_check_means_present_and_non_empty() {
        let check = PredicateCheck::default();
        assert!(!check_matches(&check, None));
        assert!(!check_matches(&check, Some(&Value::Null)));
        assert!(!check_matches(&check, Some(&json!(""))));
        assert!(check_matches(&check, Some(&json!("x"))));
        assert!(check_matches(&check, Some(&json!(0))));
        assert!(check_matches(&check, Some(&json!(false))));
    }

    #[test]
    fn predicate_without_properties_never_matches() {
        let condition = PredicateSchema { properties: None };
        assert!(!predicate_holds(&condition, &data(json!({"a": 1}))));
    }

    #[test]
    fn empty_predicate_properties_is_vacuously_true() {
        let condition: PredicateSchema =
            serde_json::from_value(json!({"properties": {}})).unwrap();
        assert!(predicate_holds(&condition, &data(json!({}))));
    }

    #[test]
    fn resolution_is_idempotent() {
        let base = conditional_base();
        let snapshot = data(json!({"role": "admin"}));
        let once = resolve(&base, &snapshot);
        let twice = resolve(&once, &snapshot);
        assert_eq!(once, twice);
    }

    #[test]
    fn key_in_both_branches_but_not_base_is_stripped() {
        // The stripping rule is purely "present in the other branch and
        // absent from base", so a key both branches declare disappears
        // even from its own selected branch.
        let base = schema(json!({
            "type": "object",
            "title": "Shared",
            "properties": {"mode": {"type": "string"}},
            "if": {"properties": {"mode": {"const": "a"}}},
            "then": {"properties": {"shared": {"type": "string"}, "only_then": {"type": "string"}}},
            "else": {"properties": {"shared": {"type": "string"}}}
        }));
        let effective = resolve(&base, &data(json!({"mode": "a"})));
        assert!(!effective.properties.contains_key("shared"));
        assert!(effective.properties.contains_key("only_then"));
    }

    #[test]
    fn effective_schema_retains_the_conditional_triple() {
        let base = conditional_base();
        let effective = resolve(&base, &data(json!({"role": "admin"})));
        assert_eq!(effective.condition, base.condition);
        assert_eq!(effective.then_branch, base.then_branch);
        assert_eq!(effective.else_branch, base.else_branch);
    }
}
