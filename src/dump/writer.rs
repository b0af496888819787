//! The dumper: serialize a payload to a string or a file, honoring write
//! modes and the ASCII-escaping option.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::dump::options::{DumpOptions, WriteMode};
use crate::dump::payload::Payload;
use crate::error::{DataError, Result};
use crate::merge::{fill_missing, union_merge};

/// Serializes payloads according to a fixed set of [`DumpOptions`].
pub struct Dumper {
    options: DumpOptions,
}

impl Dumper {
    pub fn new(options: DumpOptions) -> Self {
        Dumper { options }
    }

    /// Flatten a payload without writing anywhere. Every namespace view in
    /// the structure becomes a plain mapping.
    pub fn dump(&self, payload: Payload) -> Value {
        payload.into_value()
    }

    /// Serialize a payload to a JSON string.
    pub fn dump_to_string(&self, payload: Payload) -> Result<String> {
        self.serialize_value(&payload.into_value(), Path::new("<in-memory>"))
    }

    /// Serialize a payload to `path`, applying the configured
    /// [`WriteMode`] against any existing content, and creating missing
    /// parent directories.
    ///
    /// Returns the final in-memory value that was written, so the call
    /// chains. An existing destination that cannot be parsed fails an
    /// append-mode dump instead of being discarded.
    pub fn dump_to_file(&self, payload: Payload, path: &Path) -> Result<Value> {
        let mut value = payload.into_value();

        if self.options.mode != WriteMode::Overwrite {
            if let Some(existing) = self.read_existing(path)? {
                value = self.combine(value, existing, path)?;
            }
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    error!(path = %path.display(), %err, "failed to create parent directories");
                    DataError::write(path, err)
                })?;
            }
        }

        let serialized = self.serialize_value(&value, path)?;
        std::fs::write(path, serialized).map_err(|err| {
            error!(path = %path.display(), %err, "failed to write destination");
            DataError::write(path, err)
        })?;

        debug!(path = %path.display(), "wrote structured data");
        Ok(value)
    }

    fn read_existing(&self, path: &Path) -> Result<Option<Value>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                error!(path = %path.display(), %err, "existing destination is not UTF-8");
                return Err(DataError::EncodingFailure(path.to_path_buf()));
            }
            Err(err) => {
                error!(path = %path.display(), %err, "failed to read existing destination");
                return Err(DataError::write(path, err));
            }
        };

        let existing = serde_json::from_str(&text).map_err(|err| {
            error!(path = %path.display(), %err, "existing destination is not valid JSON");
            DataError::parse(path.display().to_string(), err)
        })?;
        Ok(Some(existing))
    }

    fn combine(&self, new: Value, existing: Value, path: &Path) -> Result<Value> {
        let (Value::Object(new_map), Value::Object(existing_map)) = (&new, &existing) else {
            error!(path = %path.display(), "append modes require mapping-shaped data on both sides");
            return Err(DataError::MergeFailure(format!(
                "append modes require mappings on both sides at {}",
                path.display()
            )));
        };

        let combined: Map<String, Value> = match self.options.mode {
            WriteMode::AppendMerge => union_merge(existing_map, new_map),
            WriteMode::AppendOverride => fill_missing(new_map, existing_map),
            WriteMode::Overwrite => unreachable!("combine is only called for append modes"),
        };
        Ok(Value::Object(combined))
    }

    fn serialize_value(&self, value: &Value, destination: &Path) -> Result<String> {
        let mut buffer = Vec::new();
        let result = if self.options.escape_non_ascii {
            let mut serializer =
                serde_json::Serializer::with_formatter(&mut buffer, AsciiFormatter);
            value.serialize(&mut serializer)
        } else {
            let mut serializer = serde_json::Serializer::new(&mut buffer);
            value.serialize(&mut serializer)
        };
        result.map_err(|err| {
            error!(path = %destination.display(), %err, "failed to serialize value");
            DataError::write(destination, err)
        })?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for Dumper {
    fn default() -> Self {
        Dumper::new(DumpOptions::default())
    }
}

/// Compact formatter that escapes every non-ASCII character as `\uXXXX`,
/// using UTF-16 surrogate pairs above the basic multilingual plane.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}
