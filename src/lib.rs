//! Summarize lists of IPv4 addresses and CIDR ranges into the biggest
//! possible supernets, leaving addresses that cannot be aggregated as
//! standalone entries.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod listener;
pub mod models;
pub mod output;
pub mod processing;

pub use config::{ExpansionPolicy, SortOrder, SummarizerConfig};
pub use error::{ConfigError, SummarizeError};
pub use listener::{ChannelListener, LogListener, ProgressEvent, SummarizerListener};
pub use models::{Ipv4, SummaryEntry};
pub use processing::{is_valid_cidr_range, is_valid_ip, Summarizer};

/// Summarize with the default configuration and no listeners.
///
/// # Examples
/// ```
/// let out = supernet_summary::summarize(&["10.0.0.0/30", "10.0.0.3"]).unwrap();
/// assert_eq!(out, vec!["10.0.0.0/30", "10.0.0.3"]);
/// ```
pub fn summarize<S: AsRef<str>>(addresses: &[S]) -> Result<Vec<String>, SummarizeError> {
    Summarizer::default().summarize(addresses)
}
