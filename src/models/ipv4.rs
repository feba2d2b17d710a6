//! IPv4 address and CIDR notation utilities.
//!
//! Provides the [`Ipv4`] block type (base address plus prefix length) and the
//! bit helpers used to cut addresses to a network, find broadcast addresses
//! and size the usable-host range of a block.

use crate::error::SummarizeError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

fn mask_too_long(addr: Ipv4Addr, len: u8) -> SummarizeError {
    SummarizeError::InvalidAddressFormat(format!("{addr}/{len}"))
}

/// Network bits for a prefix length, clamped to 32.
fn mask_bits(len: u8) -> u32 {
    let right_len = u32::from(MAX_LENGTH - len.min(MAX_LENGTH));
    u32::MAX.checked_shl(right_len).unwrap_or(0)
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use supernet_summary::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, SummarizeError> {
    if len > MAX_LENGTH {
        Err(SummarizeError::InvalidAddressFormat(format!("/{len}")))
    } else {
        Ok(mask_bits(len))
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, SummarizeError> {
    if len > MAX_LENGTH {
        Err(mask_too_long(addr, len))
    } else {
        Ok(Ipv4Addr::from(u32::from(addr) & mask_bits(len)))
    }
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, SummarizeError> {
    if len > MAX_LENGTH {
        Err(mask_too_long(addr, len))
    } else {
        let mask = mask_bits(len);
        Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
    }
}

/// Dotted quad of 1-3 digit decimal octets. Leading zeros are allowed, so
/// `010.0.0.1` reads as `10.0.0.1`.
fn parse_dotted_quad(text: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = text.split('.');
    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(Ipv4Addr::from(octets)),
    }
}

/// Prefix length written as `0`..`32` without padding.
fn parse_prefix(text: &str) -> Option<u8> {
    let digits_ok = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
    if !digits_ok || text.len() > 2 || (text.len() == 2 && text.starts_with('0')) {
        return None;
    }
    text.parse().ok().filter(|len| *len <= MAX_LENGTH)
}

/// Number of usable host addresses in a block of the given prefix length.
///
/// Network and broadcast are excluded up to /30. A /31 counts both of its
/// addresses and a /32 its single address.
pub fn num_usable_hosts(len: u8) -> Result<u64, SummarizeError> {
    match len {
        0..=30 => Ok((1u64 << (MAX_LENGTH - len)) - 2),
        31 => Ok(2),
        32 => Ok(1),
        _ => Err(SummarizeError::InvalidAddressFormat(format!("/{len}"))),
    }
}

/// IPv4 address with CIDR notation support.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// Accepts the same text as range tokens, including zero-padded octets
    /// such as `010.0.0.0/8`.
    pub fn new(addr_cidr: &str) -> Result<Ipv4, SummarizeError> {
        let addr_cidr = addr_cidr.trim();
        let invalid = || SummarizeError::InvalidAddressFormat(addr_cidr.to_string());
        let (addr, mask) = addr_cidr.split_once('/').ok_or_else(invalid)?;
        let addr = parse_dotted_quad(addr).ok_or_else(invalid)?;
        let mask = parse_prefix(mask).ok_or_else(invalid)?;
        Ok(Ipv4 { addr, mask })
    }

    /// The block of prefix length `mask` that contains `addr`.
    pub fn containing(addr: Ipv4Addr, mask: u8) -> Result<Ipv4, SummarizeError> {
        Ok(Ipv4 {
            addr: cut_addr(addr, mask)?,
            mask,
        })
    }

    /// Get the lowest (network) address in the subnet.
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.mask))
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn broadcast(&self) -> Ipv4Addr {
        let mask = mask_bits(self.mask);
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// Usable host addresses as an inclusive range of integers.
    pub fn usable_range(&self) -> RangeInclusive<u32> {
        let lo = u32::from(self.network());
        let hi = u32::from(self.broadcast());
        if self.mask <= 30 {
            (lo + 1)..=(hi - 1)
        } else {
            lo..=hi
        }
    }

    /// Iterate the usable host addresses of the block.
    pub fn usable_hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        self.usable_range().map(Ipv4Addr::from)
    }

    /// Number of usable host addresses in the block.
    pub fn num_usable_hosts(&self) -> u64 {
        let range = self.usable_range();
        u64::from(*range.end() - *range.start()) + 1
    }

    /// True if `addr` is one of the usable hosts of the block.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.usable_range().contains(&u32::from(addr))
    }

    /// True if `addr` lies anywhere in the block, network and broadcast included.
    pub fn covers(&self, addr: Ipv4Addr) -> bool {
        (self.network()..=self.broadcast()).contains(&addr)
    }
}

impl FromStr for Ipv4 {
    type Err = SummarizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
