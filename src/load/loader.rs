//! Resolution of a [`Source`] into a structured value.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::{DataError, Result};
use crate::load::{repair, tabular};
use crate::merge::merge_mappings;
use crate::namespace::{value_to_namespace, NsValue};
use crate::source::Source;

/// Load a structured value from any source.
///
/// In-memory values pass through unchanged; text is parsed strictly and, if
/// that fails, repaired and retried once; files dispatch on extension
/// (tabular vs JSON); directories load each immediate child file and fold
/// mapping-only results with the merge-into-first-schema rule.
pub fn load(source: Source) -> Result<Value> {
    match source {
        Source::Memory(value) => Ok(value),
        Source::Text(text) => parse_text(&text),
        Source::File(path) => load_file(&path),
        Source::Directory(path) => load_directory(&path),
    }
}

/// Resolve `path` against the filesystem, then load it.
pub fn load_path(path: impl AsRef<Path>) -> Result<Value> {
    load(Source::detect(path)?)
}

/// Parse raw text, with one repair attempt on failure.
pub fn load_str(text: &str) -> Result<Value> {
    load(Source::from(text))
}

/// Load from any source and convert the result to its namespace form.
pub fn load_namespace(source: Source) -> Result<NsValue> {
    let value = load(source)?;
    value_to_namespace(&value)
}

fn parse_text(text: &str) -> Result<Value> {
    let origin = Source::Text(text.to_string()).describe();
    if text.trim().is_empty() {
        error!(%origin, "refusing to parse empty input");
        return Err(DataError::parse(origin, "input is empty"));
    }

    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let repaired = repair::repair_text(text);
            match serde_json::from_str(&repaired) {
                Ok(value) => {
                    debug!(%origin, "parse succeeded after repair pass");
                    Ok(value)
                }
                Err(_) => {
                    error!(%origin, %first_err, "failed to parse text, repair pass did not help");
                    Err(DataError::parse(origin, first_err))
                }
            }
        }
    }
}

fn load_file(path: &Path) -> Result<Value> {
    if is_tabular(path) {
        let rows = tabular::read_rows(path)?;
        return Ok(Value::Array(rows.into_iter().map(Value::Object).collect()));
    }

    let text = std::fs::read_to_string(path).map_err(|err| {
        error!(path = %path.display(), %err, "failed to read file");
        match err.kind() {
            std::io::ErrorKind::NotFound => DataError::SourceNotFound(path.to_path_buf()),
            std::io::ErrorKind::InvalidData => DataError::EncodingFailure(path.to_path_buf()),
            _ => DataError::parse(path.display().to_string(), err),
        }
    })?;

    serde_json::from_str(&text).map_err(|err| {
        error!(path = %path.display(), %err, "failed to parse JSON file");
        DataError::parse(path.display().to_string(), err)
    })
}

/// Load every JSON-like immediate child of `dir` (name order), then fold the
/// results into one mapping when every one of them is a mapping.
///
/// The fold uses the merge-into-first-schema rule, so keys missing from the
/// first file are dropped, not unioned in. Mixed-shape results come back as
/// the list of parsed values, unmodified.
fn load_directory(dir: &Path) -> Result<Value> {
    let entries = std::fs::read_dir(dir).map_err(|err| {
        error!(dir = %dir.display(), %err, "failed to read directory");
        DataError::SourceNotFound(dir.to_path_buf())
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && (is_tabular(path) || is_json(path)))
        .collect();
    paths.sort();

    let mut items: Vec<Value> = Vec::new();
    for path in paths {
        if is_tabular(&path) {
            // A bad tabular file contributes nothing rather than failing the
            // whole directory load.
            match tabular::read_rows(&path) {
                Ok(rows) => items.extend(rows.into_iter().map(Value::Object)),
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping unreadable tabular file");
                }
            }
        } else {
            items.push(load_file(&path)?);
        }
    }

    let all_mappings = !items.is_empty() && items.iter().all(Value::is_object);
    if !all_mappings {
        return Ok(Value::Array(items));
    }

    let mappings: Vec<Map<String, Value>> = items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => map,
            _ => unreachable!("checked above"),
        })
        .collect();
    Ok(Value::Object(merge_mappings(&mappings)?))
}

fn is_tabular(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("csv") | Some("tsv")
    )
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_string() {
        let value = load_str(r#"{"a": 1, "b": [1, 2]}"#).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [1, 2]}));
    }

    #[test]
    fn test_load_fenced_string_via_repair() {
        let value = load_str("```json\n{\"a\": 1}\n```").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_load_over_escaped_string_via_repair() {
        let value = load_str(r#"{\"key\": \"value\"}"#).unwrap();
        assert_eq!(value, json!({"key": "value"}));
    }

    #[test]
    fn test_unparsable_string_fails_after_repair() {
        let err = load_str("{not json at all").unwrap_err();
        assert!(matches!(err, DataError::ParseFailure { .. }));
    }

    #[test]
    fn test_empty_string_is_parse_failure() {
        let err = load_str("   \n").unwrap_err();
        assert!(matches!(err, DataError::ParseFailure { .. }));
    }

    #[test]
    fn test_memory_value_passes_through() {
        let value = json!({"a": [1, {"b": null}]});
        assert_eq!(load(Source::Memory(value.clone())).unwrap(), value);
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"k": "v"}"#).unwrap();
        assert_eq!(load_path(&path).unwrap(), json!({"k": "v"}));
    }

    #[test]
    fn test_load_csv_file_as_row_mappings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "column1,column2\nvalue1,value2\n").unwrap();
        assert_eq!(
            load_path(&path).unwrap(),
            json!([{"column1": "value1", "column2": "value2"}])
        );
    }

    #[test]
    fn test_directory_fold_keeps_first_schema_only() {
        // Two mappings with disjoint keys: the first file's schema wins and
        // "b" is dropped entirely. Deliberate, if surprising.
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1_first.json"), r#"{"a": 1}"#).unwrap();
        std::fs::write(dir.path().join("2_second.json"), r#"{"b": 2}"#).unwrap();

        assert_eq!(load_path(dir.path()).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_directory_fold_merges_shared_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1.json"), r#"{"a": {"x": 1}, "b": [1]}"#).unwrap();
        std::fs::write(dir.path().join("2.json"), r#"{"a": {"x": 2}, "b": [2]}"#).unwrap();

        assert_eq!(
            load_path(dir.path()).unwrap(),
            json!({"a": {"x": 2}, "b": [1, 2]})
        );
    }

    #[test]
    fn test_directory_with_mixed_shapes_returns_list() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1.json"), r#"{"a": 1}"#).unwrap();
        std::fs::write(dir.path().join("2.json"), "[1, 2]").unwrap();

        assert_eq!(load_path(dir.path()).unwrap(), json!([{"a": 1}, [1, 2]]));
    }

    #[test]
    fn test_directory_enumeration_is_shallow() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("top.json"), r#"{"a": 1}"#).unwrap();
        std::fs::write(nested.join("deep.json"), r#"{"a": 99}"#).unwrap();

        assert_eq!(load_path(dir.path()).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_empty_directory_loads_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_path(dir.path()).unwrap(), json!([]));
    }

    #[test]
    fn test_missing_path() {
        let err = load_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DataError::SourceNotFound(_)));
    }

    #[test]
    fn test_load_namespace_from_string() {
        let ns = load_namespace(Source::from(r#"{"key": "value"}"#)).unwrap();
        let NsValue::View(view) = ns else {
            panic!("expected a view");
        };
        assert_eq!(view.get("key"), Some(&NsValue::String("value".to_string())));
    }
}
