//! Loading structured data from memory, text, files, and directories.

pub mod loader;
pub mod repair;
pub mod tabular;

pub use loader::{load, load_namespace, load_path, load_str};
