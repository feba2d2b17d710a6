//! The summarizer: runs parse/expand, the mask sweep and assembly in order.

use super::aggregator::discover_blocks;
use super::assembler::assemble;
use super::expander::build_working_set;
use crate::config::SummarizerConfig;
use crate::error::{ConfigError, SummarizeError};
use crate::listener::{Listeners, SummarizerListener};
use crate::models::SummaryEntry;

/// Summarizes address lists into the biggest possible supernets.
///
/// Each call is independent: no state other than the configuration and the
/// registered listeners survives between calls.
///
/// # Examples
/// ```
/// use supernet_summary::Summarizer;
/// let summarizer = Summarizer::default();
/// let out = summarizer.summarize(&["192.168.1.9", "192.168.1.10"]).unwrap();
/// assert_eq!(out, vec!["192.168.1.8/30"]);
/// ```
#[derive(Debug, Default)]
pub struct Summarizer {
    config: SummarizerConfig,
    listeners: Listeners,
}

impl Summarizer {
    /// Create a summarizer with a validated configuration.
    pub fn new(config: SummarizerConfig) -> Result<Summarizer, ConfigError> {
        config.validate()?;
        Ok(Summarizer {
            config,
            listeners: Listeners::new(),
        })
    }

    /// Adds a listener to the summarizer events.
    pub fn add_listener(&mut self, listener: Box<dyn SummarizerListener>) {
        self.listeners.add(listener);
    }

    /// Builder form of [`Summarizer::add_listener`].
    pub fn with_listener(mut self, listener: Box<dyn SummarizerListener>) -> Summarizer {
        self.add_listener(listener);
        self
    }

    /// Summarize addresses and CIDR ranges into typed entries.
    pub fn summarize_entries<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> Result<Vec<SummaryEntry>, SummarizeError> {
        log::info!("#Start summarize() with {} entries", addresses.len());
        let set = build_working_set(addresses, self.config.expansion, &self.listeners)?;
        let found = discover_blocks(&set, &self.config, &self.listeners)?;
        Ok(assemble(&set, &found, &self.config))
    }

    /// Summarize addresses and CIDR ranges.
    ///
    /// Network (192.168.1.8 in 192.168.1.8/30) and broadcast (192.168.1.11)
    /// addresses are not part of a range. When they are given as standalone
    /// addresses they are returned as such, unless a bigger supernet takes
    /// them in or `fold_edge_addresses` is set.
    ///
    /// - Input: 192.168.1.8, 192.168.1.9, 192.168.1.10, 192.168.1.11
    /// - Output: 192.168.1.11, 192.168.1.8, 192.168.1.8/30
    pub fn summarize<S: AsRef<str>>(&self, addresses: &[S]) -> Result<Vec<String>, SummarizeError> {
        let entries = self.summarize_entries(addresses)?;
        Ok(entries.iter().map(|entry| entry.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortOrder;
    use crate::listener::{ChannelListener, ProgressEvent};
    use std::sync::mpsc;

    #[test]
    fn test_new_rejects_bad_config() {
        let config = SummarizerConfig {
            min_mask: 30,
            max_mask: 8,
            ..Default::default()
        };
        assert!(Summarizer::new(config).is_err());
    }

    #[test]
    fn test_summarize_scenario_one() {
        let out = Summarizer::default()
            .summarize(&["192.168.1.8", "192.168.1.9", "192.168.1.10", "192.168.1.11"])
            .unwrap();
        assert_eq!(out, vec!["192.168.1.11", "192.168.1.8", "192.168.1.8/30"]);
    }

    #[test]
    fn test_summarize_numeric() {
        let summarizer = Summarizer::new(SummarizerConfig {
            sort: SortOrder::Numeric,
            ..Default::default()
        })
        .unwrap();
        let out = summarizer.summarize(&["10.0.0.1", "2.0.0.1"]).unwrap();
        assert_eq!(out, vec!["2.0.0.1", "10.0.0.1"]);
        let out = Summarizer::default()
            .summarize(&["10.0.0.1", "2.0.0.1"])
            .unwrap();
        assert_eq!(out, vec!["10.0.0.1", "2.0.0.1"]);
    }

    #[test]
    fn test_event_sequence() {
        let (tx, rx) = mpsc::channel();
        let summarizer = Summarizer::new(SummarizerConfig {
            min_mask: 29,
            max_mask: 30,
            ..Default::default()
        })
        .unwrap()
        .with_listener(Box::new(ChannelListener::new(tx)));

        summarizer.summarize(&["10.0.0.0/30", "10.0.0.7"]).unwrap();
        drop(summarizer);

        let events: Vec<ProgressEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                ProgressEvent::AnalysingRange("10.0.0.0/30".to_string()),
                ProgressEvent::SummarizingStarted(3),
                ProgressEvent::ProcessingMask(29),
                ProgressEvent::ProcessingMask(30),
            ]
        );
    }

    #[test]
    fn test_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Summarizer>();

        let (tx, rx) = mpsc::channel();
        let summarizer = Summarizer::default().with_listener(Box::new(ChannelListener::new(tx)));
        let (left, right) = std::thread::scope(|s| {
            let left = s.spawn(|| summarizer.summarize(&["192.168.1.9", "192.168.1.10"]));
            let right = s.spawn(|| summarizer.summarize(&["10.0.0.1", "10.0.0.2"]));
            (left.join().unwrap(), right.join().unwrap())
        });
        assert_eq!(left.unwrap(), vec!["192.168.1.8/30"]);
        assert_eq!(right.unwrap(), vec!["10.0.0.0/30"]);
        drop(summarizer);

        let started = rx
            .iter()
            .filter(|e| matches!(e, ProgressEvent::SummarizingStarted(2)))
            .count();
        assert_eq!(started, 2);
    }

    #[test]
    fn test_failure_after_partial_notifications() {
        let (tx, rx) = mpsc::channel();
        let summarizer =
            Summarizer::default().with_listener(Box::new(ChannelListener::new(tx)));
        let err = summarizer
            .summarize(&["10.0.0.0/30", "bogus"])
            .unwrap_err();
        assert_eq!(err, SummarizeError::InvalidAddressFormat("bogus".to_string()));
        drop(summarizer);
        let events: Vec<ProgressEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![ProgressEvent::AnalysingRange("10.0.0.0/30".to_string())]
        );
    }
}
