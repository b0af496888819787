//! Error types shared by every operation in the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for crucible operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading, merging, or persisting structured data.
///
/// Every runtime failure is logged with source context at the boundary of the
/// operation that produced it and surfaced as one of these variants; callers
/// never see a raw I/O or serde error escape, and never an empty value standing
/// in for a failure. [`DataError::InvalidUsage`] is the exception: it marks a
/// programmer error (a violated precondition), not a runtime failure.
#[derive(Error, Debug)]
pub enum DataError {
    /// The requested file or directory does not exist.
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    /// Input could not be parsed as structured data, even after the repair pass.
    #[error("failed to parse {origin}: {message}")]
    ParseFailure {
        /// Identifies the offending source (path or an input-text excerpt).
        origin: String,
        message: String,
    },

    /// Writing the destination failed (directory creation, serialization, or I/O).
    #[error("failed to write {path}: {message}")]
    WriteFailure { path: PathBuf, message: String },

    /// Inputs could not be merged.
    #[error("merge failed: {0}")]
    MergeFailure(String),

    /// File content was not valid UTF-8.
    #[error("non-UTF-8 content in {0}")]
    EncodingFailure(PathBuf),

    /// A precondition was violated by the caller.
    #[error("invalid usage: {0}")]
    InvalidUsage(String),
}

impl DataError {
    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        DataError::ParseFailure {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        DataError::WriteFailure {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
