//! Shared helpers

pub mod format;
pub mod paths;

pub use format::{format_bytes, format_with_commas};
pub use paths::{is_hidden_path, normalize_path, to_forward_slashes};
