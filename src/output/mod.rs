//! Output formatting for summarizer results.
//!
//! This module handles writing result entries:
//! - [`json`] - JSON array output
//! - [`terminal`] - line output with colors

mod json;
mod terminal;

pub use json::{to_json, write_json};
pub use terminal::{format_entry, summary_line, write_entries};
