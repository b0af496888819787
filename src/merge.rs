//! Merging of mapping values.
//!
//! Two families of merge live here. [`merge_mappings`] implements the
//! merge-into-first-schema fold used when a directory of same-shaped documents
//! is collapsed into one: only keys already present in the first mapping are
//! ever updated, later mappings never add keys. [`union_merge`] and
//! [`fill_missing`] are the append-mode merges used by the dumper; both
//! produce a full union of keys and differ in which side wins conflicts.
//!
//! Every function here has value semantics: inputs are never mutated, the
//! result is always a fresh mapping.

use serde_json::{Map, Value};

use crate::error::{DataError, Result};

/// Fold a non-empty slice of mappings into one, keyed by the first mapping's
/// schema.
///
/// For each key of the running result that also appears in a later mapping:
/// two mappings recurse, two sequences concatenate in order (no
/// deduplication), anything else the later value overwrites. Keys absent from
/// the first mapping are deliberately never added.
///
/// An empty slice is a precondition violation and yields
/// [`DataError::InvalidUsage`].
pub fn merge_mappings(mappings: &[Map<String, Value>]) -> Result<Map<String, Value>> {
    let (first, rest) = mappings
        .split_first()
        .ok_or_else(|| DataError::InvalidUsage("merge_mappings requires at least one mapping".to_string()))?;

    let mut merged = first.clone();
    for mapping in rest {
        merge_into(&mut merged, mapping);
    }
    Ok(merged)
}

fn merge_into(merged: &mut Map<String, Value>, later: &Map<String, Value>) {
    for (key, current) in merged.iter_mut() {
        let Some(incoming) = later.get(key) else {
            continue;
        };
        match (current, incoming) {
            (Value::Object(current), Value::Object(incoming)) => {
                merge_into(current, incoming);
            }
            (Value::Array(current), Value::Array(incoming)) => {
                current.extend(incoming.iter().cloned());
            }
            (current, incoming) => {
                *current = incoming.clone();
            }
        }
    }
}

/// Deep union of two mappings where `overlay` wins conflicts.
///
/// Shared nested mappings recurse, shared sequences concatenate
/// base-then-overlay, shared scalars take the overlay's value. Keys only in
/// `overlay` are appended after the base's keys.
pub fn union_merge(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut result = base.clone();
    for (key, incoming) in overlay {
        match (result.get_mut(key), incoming) {
            (Some(Value::Object(current)), Value::Object(incoming)) => {
                *current = union_merge(current, incoming);
            }
            (Some(Value::Array(current)), Value::Array(incoming)) => {
                current.extend(incoming.iter().cloned());
            }
            (Some(current), incoming) => {
                *current = incoming.clone();
            }
            (None, incoming) => {
                result.insert(key.clone(), incoming.clone());
            }
        }
    }
    result
}

/// Deep union where `primary` wins every conflict; `fallback` only fills in
/// keys the primary lacks, recursing into shared nested mappings.
pub fn fill_missing(primary: &Map<String, Value>, fallback: &Map<String, Value>) -> Map<String, Value> {
    let mut result = primary.clone();
    for (key, fallback_value) in fallback {
        match (result.get_mut(key), fallback_value) {
            (Some(Value::Object(current)), Value::Object(fallback_map)) => {
                *current = fill_missing(current, fallback_map);
            }
            (Some(_), _) => {}
            (None, fallback_value) => {
                result.insert(key.clone(), fallback_value.clone());
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_invalid_usage() {
        let err = merge_mappings(&[]).unwrap_err();
        assert!(matches!(err, DataError::InvalidUsage(_)));
    }

    #[test]
    fn test_scalar_overwrite_and_list_concat() {
        let inputs = vec![
            map(json!({"a": {"x": 1}, "b": [1]})),
            map(json!({"a": {"x": 2}, "b": [2]})),
        ];
        let merged = merge_mappings(&inputs).unwrap();
        assert_eq!(Value::Object(merged), json!({"a": {"x": 2}, "b": [1, 2]}));
    }

    #[test]
    fn test_later_keys_are_never_added() {
        // The first mapping fixes the schema: "b" is dropped, not unioned in.
        let inputs = vec![map(json!({"a": 1})), map(json!({"b": 2}))];
        let merged = merge_mappings(&inputs).unwrap();
        assert_eq!(Value::Object(merged), json!({"a": 1}));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let inputs = vec![map(json!({"b": [1]})), map(json!({"b": [2]}))];
        let _ = merge_mappings(&inputs).unwrap();
        assert_eq!(Value::Object(inputs[0].clone()), json!({"b": [1]}));
    }

    #[test]
    fn test_merge_associative_for_shared_scalar_schema() {
        let a = map(json!({"k": 1, "l": "x"}));
        let b = map(json!({"k": 2, "l": "y"}));
        let c = map(json!({"k": 3, "l": "z"}));

        let all_at_once = merge_mappings(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let ab = merge_mappings(&[a, b]).unwrap();
        let staged = merge_mappings(&[ab, c]).unwrap();
        assert_eq!(all_at_once, staged);
    }

    #[test]
    fn test_union_merge_adds_new_keys() {
        let base = map(json!({"a": 1, "nested": {"x": 1}, "items": [1]}));
        let overlay = map(json!({"a": 9, "nested": {"y": 2}, "items": [2], "b": 2}));
        let result = union_merge(&base, &overlay);
        assert_eq!(
            Value::Object(result),
            json!({"a": 9, "nested": {"x": 1, "y": 2}, "items": [1, 2], "b": 2})
        );
    }

    #[test]
    fn test_fill_missing_keeps_primary_values() {
        let primary = map(json!({"a": 9, "items": [2], "nested": {"x": 5}}));
        let fallback = map(json!({"a": 1, "items": [1, 1], "nested": {"x": 0, "y": 7}, "b": 3}));
        let result = fill_missing(&primary, &fallback);
        assert_eq!(
            Value::Object(result),
            json!({"a": 9, "items": [2], "nested": {"x": 5, "y": 7}, "b": 3})
        );
    }
}
