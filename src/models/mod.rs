//! Domain models for supernet summarization.
//!
//! This module contains the core data structures used throughout the library:
//! - [`Ipv4`] - IPv4 block with CIDR notation support
//! - [`AddressSet`] - order-preserving working set of unique addresses
//! - [`SummaryEntry`] - one standalone address or discovered block of output

mod address_set;
mod entry;
mod ipv4;

// Re-export public types
pub use address_set::{AddressSet, SortedAddresses};
pub use entry::SummaryEntry;
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, num_usable_hosts, Ipv4, MAX_LENGTH,
};
