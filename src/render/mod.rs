//! Output rendering (text and JSON plan reports)

pub mod report;

pub use report::{render_json, render_text};
