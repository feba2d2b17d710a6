//! Terminal output utilities.
//!
//! Writes one entry per line; blocks and standalone addresses are coloured
//! differently when writing to a terminal.

use crate::models::SummaryEntry;
use colored::Colorize;
use std::io::{self, Write};

/// Format one entry, coloured when `color` is set.
pub fn format_entry(entry: &SummaryEntry, color: bool) -> String {
    let text = entry.to_string();
    if !color {
        return text;
    }
    if entry.is_block() {
        text.green().bold().to_string()
    } else {
        text.yellow().to_string()
    }
}

/// Write entries one per line.
pub fn write_entries<W: Write>(out: &mut W, entries: &[SummaryEntry], color: bool) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{}", format_entry(entry, color))?;
    }
    Ok(())
}

/// One-line tally, e.g. `3 entries: 1 blocks, 2 addresses`.
pub fn summary_line(entries: &[SummaryEntry]) -> String {
    let blocks = entries.iter().filter(|e| e.is_block()).count();
    format!(
        "{} entries: {} blocks, {} addresses",
        entries.len(),
        blocks,
        entries.len() - blocks
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;
    use std::net::Ipv4Addr;

    fn entries() -> Vec<SummaryEntry> {
        vec![
            SummaryEntry::Address(Ipv4Addr::new(192, 168, 1, 11)),
            SummaryEntry::Block(Ipv4::new("192.168.1.8/30").unwrap()),
        ]
    }

    #[test]
    fn test_format_entry_plain() {
        let e = entries();
        assert_eq!(format_entry(&e[0], false), "192.168.1.11");
        assert_eq!(format_entry(&e[1], false), "192.168.1.8/30");
    }

    #[test]
    fn test_format_entry_color_keeps_text() {
        let e = entries();
        assert!(format_entry(&e[1], true).contains("192.168.1.8/30"));
    }

    #[test]
    fn test_write_entries() {
        let mut out = Vec::new();
        write_entries(&mut out, &entries(), false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "192.168.1.11\n192.168.1.8/30\n"
        );
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(&entries()), "2 entries: 1 blocks, 1 addresses");
        assert_eq!(summary_line(&[]), "0 entries: 0 blocks, 0 addresses");
    }
}
