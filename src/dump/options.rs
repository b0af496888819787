//! Dump configuration.

/// How an existing destination file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Replace the destination contents.
    #[default]
    Overwrite,
    /// Deep-merge new data into the existing content: mappings recurse,
    /// sequences concatenate existing-then-new, scalar conflicts take the new
    /// value, and keys new to the destination are appended.
    AppendMerge,
    /// New data wins wholesale; existing content only fills in keys the new
    /// data lacks.
    AppendOverride,
}

/// Options for a [`Dumper`](crate::dump::Dumper).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Behavior when the destination already exists.
    pub mode: WriteMode,
    /// Escape every non-ASCII character as `\uXXXX` in the output. Off by
    /// default: output is plain UTF-8.
    pub escape_non_ascii: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            mode: WriteMode::Overwrite,
            escape_non_ascii: false,
        }
    }
}

impl DumpOptions {
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_escape_non_ascii(mut self, escape: bool) -> Self {
        self.escape_non_ascii = escape;
        self
    }
}
