//! Source descriptors for load operations.
//!
//! A [`Source`] tags the origin of the data once, at the call boundary, so the
//! loader dispatches on a closed set of variants instead of re-probing the
//! value's runtime shape at every step.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{DataError, Result};

/// The origin of a load operation.
#[derive(Debug, Clone)]
pub enum Source {
    /// A value already in memory; loading passes it through unchanged.
    Memory(Value),
    /// Raw text to be parsed as JSON (with one repair attempt on failure).
    Text(String),
    /// A single file on disk, dispatched by extension.
    File(PathBuf),
    /// A directory whose immediate children are loaded and folded together.
    Directory(PathBuf),
}

impl Source {
    /// Classify `path` by inspecting the filesystem.
    ///
    /// A path that does not exist resolves to [`DataError::SourceNotFound`]
    /// here rather than deep inside the load.
    pub fn detect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Ok(Source::Directory(path.to_path_buf()))
        } else if path.is_file() {
            Ok(Source::File(path.to_path_buf()))
        } else {
            Err(DataError::SourceNotFound(path.to_path_buf()))
        }
    }

    /// A short identifier for log and error messages.
    pub fn describe(&self) -> String {
        match self {
            Source::Memory(_) => "<in-memory value>".to_string(),
            Source::Text(text) => {
                // Excerpt only; raw inputs can be arbitrarily large.
                let excerpt: String = text.chars().take(60).collect();
                if excerpt.len() < text.len() {
                    format!("<text: {excerpt}...>")
                } else {
                    format!("<text: {excerpt}>")
                }
            }
            Source::File(path) | Source::Directory(path) => path.display().to_string(),
        }
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Source::Memory(value)
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}
