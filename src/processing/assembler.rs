//! Final output assembly.
//!
//! Working-set addresses that no discovered block accounts for stay as
//! standalone entries; they are merged with the blocks and sorted.

use super::aggregator::DiscoveredBlocks;
use crate::config::{SortOrder, SummarizerConfig};
use crate::models::{AddressSet, SummaryEntry};

/// Build the sorted result entries.
///
/// By default only usable hosts count as inside a block, so a block's
/// network and broadcast addresses that were given as input stay standalone.
/// `fold_edge_addresses` absorbs them into the block instead.
pub fn assemble(
    set: &AddressSet,
    found: &DiscoveredBlocks,
    config: &SummarizerConfig,
) -> Vec<SummaryEntry> {
    let standalone = set.iter().filter(|addr| {
        if config.fold_edge_addresses {
            !found.covers(*addr)
        } else {
            !found.contains(*addr)
        }
    });

    let mut entries: Vec<SummaryEntry> = standalone
        .map(SummaryEntry::Address)
        .chain(found.iter().map(|block| SummaryEntry::Block(*block)))
        .collect();

    log::info!(
        "Assembled {} entries ({} blocks, {} standalone)",
        entries.len(),
        found.len(),
        entries.len() - found.len()
    );

    match config.sort {
        SortOrder::Lexicographic => entries.sort_by_cached_key(|entry| entry.to_string()),
        SortOrder::Numeric => entries.sort_by_key(SummaryEntry::numeric_key),
    }
    entries
}
