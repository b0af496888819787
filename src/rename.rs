//! Recursive key renaming.
//!
//! [`rename_key`] is the pure transformation; [`rekey_file`] and
//! [`rekey_tree`] apply it to JSON files on disk, the latter walking a
//! directory recursively.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error};

use crate::dump::{DumpOptions, Dumper};
use crate::error::{DataError, Result};
use crate::load::load_str;

/// Produce an equivalent value with every occurrence of the key `old` renamed
/// to `new`, at any nesting depth, inside mappings and sequence elements
/// alike.
///
/// Key positions are preserved and non-matching keys are untouched. The
/// operation is idempotent: once `old` is gone a second pass is a no-op.
pub fn rename_key(value: &Value, old: &str, new: &str) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, nested)| {
                    let key = if key == old { new.to_string() } else { key.clone() };
                    (key, rename_key(nested, old, new))
                })
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| rename_key(item, old, new)).collect())
        }
        scalar => scalar.clone(),
    }
}

/// Rewrite a single JSON file in place with the rename applied.
pub fn rekey_file(path: &Path, old: &str, new: &str) -> Result<()> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        error!(path = %path.display(), %err, "failed to read file for rekey");
        if err.kind() == std::io::ErrorKind::NotFound {
            DataError::SourceNotFound(path.to_path_buf())
        } else if err.kind() == std::io::ErrorKind::InvalidData {
            DataError::EncodingFailure(path.to_path_buf())
        } else {
            DataError::write(path, err)
        }
    })?;

    let value = load_str(&text)?;
    let renamed = rename_key(&value, old, new);

    let dumper = Dumper::new(DumpOptions::default());
    dumper.dump_to_file(renamed.into(), path)?;
    debug!(path = %path.display(), old, new, "rekeyed file");
    Ok(())
}

/// Walk `dir` recursively and rekey every `.json` file found.
///
/// Per-file failures are logged and skipped so one bad file does not abort the
/// walk. Returns the number of files successfully rewritten.
pub fn rekey_tree(dir: &Path, old: &str, new: &str) -> Result<usize> {
    if !dir.is_dir() {
        return Err(DataError::SourceNotFound(dir.to_path_buf()));
    }

    let mut processed = 0;
    for path in json_files_recursive(dir)? {
        match rekey_file(&path, old, new) {
            Ok(()) => processed += 1,
            Err(err) => {
                error!(path = %path.display(), %err, "skipping file during rekey walk");
            }
        }
    }
    Ok(processed)
}

fn json_files_recursive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|err| {
        error!(dir = %dir.display(), %err, "failed to read directory");
        DataError::SourceNotFound(dir.to_path_buf())
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            files.extend(json_files_recursive(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rename_inside_list_and_nested_mapping() {
        let input = json!([{"name": "x"}, {"other": {"name": "y"}}]);
        let renamed = rename_key(&input, "name", "category_name");
        assert_eq!(
            renamed,
            json!([{"category_name": "x"}, {"other": {"category_name": "y"}}])
        );
    }

    #[test]
    fn test_rename_is_idempotent() {
        let input = json!({"name": "x", "items": [{"name": "y", "keep": 1}]});
        let once = rename_key(&input, "name", "category_name");
        let twice = rename_key(&once, "name", "category_name");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rename_preserves_key_position() {
        let input = json!({"first": 1, "name": 2, "last": 3});
        let renamed = rename_key(&input, "name", "category_name");
        let keys: Vec<&String> = renamed.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["first", "category_name", "last"]);
    }

    #[test]
    fn test_rename_leaves_input_untouched() {
        let input = json!({"name": "x"});
        let _ = rename_key(&input, "name", "category_name");
        assert_eq!(input, json!({"name": "x"}));
    }

    #[test]
    fn test_rekey_tree_rewrites_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{"name": "top"}"#).unwrap();
        std::fs::write(nested.join("b.json"), r#"[{"name": "deep"}]"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not json").unwrap();

        let processed = rekey_tree(dir.path(), "name", "category_name").unwrap();
        assert_eq!(processed, 2);

        let a = std::fs::read_to_string(dir.path().join("a.json")).unwrap();
        assert!(a.contains("category_name"));
        let b = std::fs::read_to_string(nested.join("b.json")).unwrap();
        assert!(b.contains("category_name"));
    }

    #[test]
    fn test_rekey_tree_skips_unparsable_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.json"), r#"{"name": 1}"#).unwrap();
        std::fs::write(dir.path().join("bad.json"), "{broken").unwrap();

        let processed = rekey_tree(dir.path(), "name", "category_name").unwrap();
        assert_eq!(processed, 1);
    }

    #[test]
    fn test_rekey_tree_missing_directory() {
        let err = rekey_tree(Path::new("/no/such/dir"), "a", "b").unwrap_err();
        assert!(matches!(err, DataError::SourceNotFound(_)));
    }
}
