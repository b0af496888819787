//! # Crucible - structured data loading, merging, and persistence
//!
//! A unified library for loading JSON-shaped data from heterogeneous sources
//! (in-memory values, raw text, single files, directories), merging mappings,
//! renaming keys recursively, projecting mappings into attribute-style
//! namespace views, and persisting the results.
//!
//! ## Modules
//!
//! - **load**: resolve a [`Source`] into a value, with a one-shot repair pass
//!   for almost-JSON text and a tabular reader for `.csv`/`.tsv` files
//! - **dump**: serialize values and views to strings or files, with
//!   overwrite/append-merge/append-override write modes
//! - **merge**: merge-into-first-schema folds and the append-mode unions
//! - **rename**: recursive key renaming, in memory and across file trees
//! - **namespace**: lossless mapping/namespace-view conversion
//!
//! ## Quick Start
//!
//! ### Loading and repairing text
//!
//! ```rust
//! use crucible::load_str;
//! use serde_json::json;
//!
//! # fn main() -> crucible::Result<()> {
//! // Strict JSON parses directly.
//! let value = load_str(r#"{"a": 1, "b": [1, 2]}"#)?;
//! assert_eq!(value, json!({"a": 1, "b": [1, 2]}));
//!
//! // A fenced, over-escaped response still loads after the repair pass.
//! let value = load_str("```json\n{\"a\": 1}\n```")?;
//! assert_eq!(value, json!({"a": 1}));
//! # Ok(())
//! # }
//! ```
//!
//! ### Merging same-shaped mappings
//!
//! ```rust
//! use crucible::merge_mappings;
//! use serde_json::{json, Value};
//!
//! # fn main() -> crucible::Result<()> {
//! let a = json!({"a": {"x": 1}, "b": [1]});
//! let b = json!({"a": {"x": 2}, "b": [2]});
//! let merged = merge_mappings(&[
//!     a.as_object().unwrap().clone(),
//!     b.as_object().unwrap().clone(),
//! ])?;
//! assert_eq!(Value::Object(merged), json!({"a": {"x": 2}, "b": [1, 2]}));
//! # Ok(())
//! # }
//! ```

pub mod dump;
pub mod error;
pub mod load;
pub mod merge;
pub mod namespace;
pub mod rename;
pub mod source;

// Re-export commonly used types for convenience
pub use dump::{DumpOptions, Dumper, Payload, WriteMode};
pub use error::{DataError, Result};
pub use load::{load, load_namespace, load_path, load_str};
pub use merge::{fill_missing, merge_mappings, union_merge};
pub use namespace::{namespace_to_value, value_to_namespace, NamespaceView, NsValue};
pub use rename::{rekey_file, rekey_tree, rename_key};
pub use source::Source;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_dump_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round_trip.json");
        let value = json!({
            "null": null,
            "flag": true,
            "count": 3,
            "ratio": 0.5,
            "text": "héllo",
            "items": [1, "two", {"three": 3}],
            "nested": {"deep": {"deeper": []}}
        });

        Dumper::default().dump_to_file(value.clone().into(), &path).unwrap();
        assert_eq!(load_path(&path).unwrap(), value);
    }

    #[test]
    fn test_namespace_round_trip_through_dump() {
        let mapping = json!({"key": "value", "nested": {"inner": [1, 2]}});
        let ns = load_namespace(Source::Memory(mapping.clone())).unwrap();
        let NsValue::View(view) = ns else {
            panic!("expected a view");
        };
        assert_eq!(Dumper::default().dump(view.into()), mapping);
    }

    #[test]
    fn test_rename_then_dump_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("renamed.json");

        let value = json!([{"name": "x"}, {"other": {"name": "y"}}]);
        let renamed = rename_key(&value, "name", "category_name");
        Dumper::default().dump_to_file(renamed.into(), &path).unwrap();

        assert_eq!(
            load_path(&path).unwrap(),
            json!([{"category_name": "x"}, {"other": {"category_name": "y"}}])
        );
    }
}
