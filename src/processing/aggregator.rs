//! Mask sweep that discovers full blocks in the working set.
//!
//! Prefix lengths are tried from widest to narrowest. At each length every
//! address not yet covered by an earlier block anchors a candidate block,
//! which is accepted only when all of its usable hosts are present.

use crate::config::{SummarizerConfig, MAX_DISCOVERY_MASK};
use crate::error::SummarizeError;
use crate::listener::Listeners;
use crate::models::{num_usable_hosts, AddressSet, Ipv4};
use colored::Colorize;
use std::collections::{BTreeSet, HashSet};
use std::net::Ipv4Addr;

/// Blocks found by the sweep, in discovery order.
///
/// Blocks never overlap: a candidate inside an existing block is skipped.
#[derive(Debug, Default, Clone)]
pub struct DiscoveredBlocks {
    blocks: Vec<Ipv4>,
    index: HashSet<Ipv4>,
    masks: BTreeSet<u8>,
}

impl DiscoveredBlocks {
    pub fn new() -> DiscoveredBlocks {
        DiscoveredBlocks::default()
    }

    /// Record a block; `block.addr` must be its network address.
    pub fn push(&mut self, block: Ipv4) {
        if self.index.insert(block) {
            self.masks.insert(block.mask);
            self.blocks.push(block);
        }
    }

    /// The block whose full range, network and broadcast included, holds `addr`.
    pub fn covering_block(&self, addr: Ipv4Addr) -> Option<Ipv4> {
        self.masks.iter().find_map(|&mask| {
            let block = Ipv4 { addr, mask };
            let key = Ipv4 {
                addr: block.network(),
                mask,
            };
            self.index.get(&key).copied()
        })
    }

    /// True if `addr` lies anywhere in a discovered block.
    pub fn covers(&self, addr: Ipv4Addr) -> bool {
        self.covering_block(addr).is_some()
    }

    /// True if `addr` is a usable host of a discovered block.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.covering_block(addr)
            .map(|block| block.contains(addr))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ipv4> {
        self.blocks.iter()
    }
}

/// Run the sweep over `config.min_mask..=config.max_mask`.
///
/// `processing_mask` fires once per prefix length, in ascending order, before
/// that length is scanned.
pub fn discover_blocks(
    set: &AddressSet,
    config: &SummarizerConfig,
    listeners: &Listeners,
) -> Result<DiscoveredBlocks, SummarizeError> {
    let sorted = set.sorted();
    let mut found = DiscoveredBlocks::new();
    let max_mask = config.max_mask.min(MAX_DISCOVERY_MASK);

    for mask in config.min_mask..=max_mask {
        listeners.publish_mask_started(mask);
        let needed = num_usable_hosts(mask)?;
        if needed > set.len() as u64 {
            log::debug!("Mask /{mask}: needs {needed} hosts, only {} present", set.len());
            continue;
        }

        let before = found.len();
        // Networks already counted short at this mask.
        let mut rejected: HashSet<Ipv4> = HashSet::new();

        for addr in set.iter() {
            if found.covers(addr) {
                continue;
            }
            let candidate = Ipv4::containing(addr, mask)?;
            if rejected.contains(&candidate) {
                continue;
            }
            let present = sorted.count_in(&candidate.usable_range());
            log::trace!("{addr} -> {candidate}: {present}/{needed} hosts present");
            if present == needed {
                log::debug!("Found full range {}", candidate.to_string().green());
                found.push(candidate);
            } else {
                rejected.insert(candidate);
            }
        }
        log::debug!(
            "Mask /{mask}: {} new blocks, {} total",
            found.len() - before,
            found.len()
        );
    }

    log::info!("Discovered {} blocks", found.len());
    Ok(found)
}
