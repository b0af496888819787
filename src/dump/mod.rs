//! Serialization of structured values and namespace views to destinations.

pub mod options;
pub mod payload;
pub mod writer;

pub use options::{DumpOptions, WriteMode};
pub use payload::Payload;
pub use writer::Dumper;
