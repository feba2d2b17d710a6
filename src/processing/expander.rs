//! Expansion of input tokens into the working set.

use super::parser::{classify, Token};
use crate::config::ExpansionPolicy;
use crate::error::SummarizeError;
use crate::listener::Listeners;
use crate::models::{AddressSet, Ipv4};
use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Addresses written verbatim, in canonical dotted-quad form, among the raw tokens.
fn explicit_addresses<S: AsRef<str>>(raw: &[S]) -> HashSet<u32> {
    raw.iter()
        .filter_map(|entry| {
            let entry = entry.as_ref();
            let addr: Ipv4Addr = entry.parse().ok()?;
            (addr.to_string() == entry).then(|| u32::from(addr))
        })
        .collect()
}

/// Add the usable hosts of `range` that pass `keep`.
fn expand_range<F>(set: &mut AddressSet, range: Ipv4, keep: F) -> usize
where
    F: Fn(Ipv4Addr) -> bool,
{
    let before = set.len();
    set.extend(range.usable_hosts().filter(|host| keep(*host)));
    set.len() - before
}

/// Validate every token and collect the unique addresses they represent.
///
/// Fails on the first invalid token. `analysing_range` fires for each CIDR
/// token before it is expanded and `summarizing_started` once at the end.
pub fn build_working_set<S: AsRef<str>>(
    raw: &[S],
    policy: ExpansionPolicy,
    listeners: &Listeners,
) -> Result<AddressSet, SummarizeError> {
    let explicit = match policy {
        ExpansionPolicy::SkipExplicit => explicit_addresses(raw),
        ExpansionPolicy::IncludeAll => HashSet::new(),
    };
    let mut set = AddressSet::new();
    let mut range_count = 0;

    for entry in raw {
        let token = match classify(entry.as_ref())? {
            Some(token) => token,
            None => continue,
        };
        match token {
            Token::Address(addr) => {
                set.insert(addr);
            }
            Token::Range(range) => {
                range_count += 1;
                listeners.publish_range_analysis_started(entry.as_ref().trim());
                if range.mask == 32 {
                    set.insert(range.addr);
                } else {
                    let added =
                        expand_range(&mut set, range, |host| !explicit.contains(&u32::from(host)));
                    log::debug!("Range {range} added {added} addresses");
                }
            }
        }
    }

    log::info!(
        "Expanded {} tokens ({} ranges) into {} unique addresses",
        raw.len(),
        range_count,
        set.len()
    );
    listeners.publish_summarize_start(set.len());
    Ok(set)
}
