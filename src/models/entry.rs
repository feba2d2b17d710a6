//! A single line of summarizer output.

use super::Ipv4;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv4Addr;

/// Either a standalone address or a discovered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryEntry {
    Address(Ipv4Addr),
    Block(Ipv4),
}

impl SummaryEntry {
    /// Key for numeric ordering: address value, then prefix length.
    /// A standalone address ranks as a /32.
    pub fn numeric_key(&self) -> (u32, u8) {
        match self {
            SummaryEntry::Address(addr) => (u32::from(*addr), 32),
            SummaryEntry::Block(block) => (u32::from(block.addr), block.mask),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, SummaryEntry::Block(_))
    }
}

impl fmt::Display for SummaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryEntry::Address(addr) => write!(f, "{addr}"),
            SummaryEntry::Block(block) => write!(f, "{block}"),
        }
    }
}

impl Serialize for SummaryEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
