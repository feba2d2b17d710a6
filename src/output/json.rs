//! JSON output: a flat array of entry strings.

use crate::models::SummaryEntry;
use std::io::Write;

/// Render entries as a pretty-printed JSON array of strings.
pub fn to_json(entries: &[SummaryEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

/// Write the JSON array followed by a newline.
pub fn write_json<W: Write>(out: &mut W, entries: &[SummaryEntry]) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut *out, entries)?;
    writeln!(out)?;
    Ok(())
}
