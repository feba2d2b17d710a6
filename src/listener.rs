//! Progress notifications fired while summarizing.
//!
//! Observers are called synchronously, in registration order, and cannot
//! change the outcome of a run. Notifications already fired stay fired when a
//! later token turns out to be invalid.

use colored::Colorize;
use serde::Serialize;
use std::sync::mpsc::Sender;

/// Observer of summarizer progress. Every method defaults to a no-op.
///
/// Listeners are shared with the summarizer, which may be used from several
/// threads at once.
pub trait SummarizerListener: Send + Sync {
    /// A prefix length is about to be swept. Fired in ascending order.
    fn processing_mask(&self, _mask: u8) {}

    /// Expansion finished; `size` unique addresses will be aggregated.
    fn summarizing_started(&self, _size: usize) {}

    /// A CIDR token is about to be expanded; `entry` is the token text.
    fn analysing_range(&self, _entry: &str) {}
}

/// One notification as a value, for channel based consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum ProgressEvent {
    AnalysingRange(String),
    SummarizingStarted(usize),
    ProcessingMask(u8),
}

/// Writes every notification to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogListener;

impl SummarizerListener for LogListener {
    fn processing_mask(&self, mask: u8) {
        log::info!("Processing mask /{}", mask.to_string().cyan());
    }

    fn summarizing_started(&self, size: usize) {
        log::info!("Summarizing {} unique addresses", size.to_string().green());
    }

    fn analysing_range(&self, entry: &str) {
        log::info!("Analysing range {}", entry.on_blue());
    }
}

/// Forwards notifications as [`ProgressEvent`]s over a channel.
///
/// A dropped receiver is ignored; the run carries on.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: Sender<ProgressEvent>,
}

impl ChannelListener {
    pub fn new(tx: Sender<ProgressEvent>) -> ChannelListener {
        ChannelListener { tx }
    }

    fn send(&self, event: ProgressEvent) {
        if self.tx.send(event).is_err() {
            log::trace!("progress receiver gone, event dropped");
        }
    }
}

impl SummarizerListener for ChannelListener {
    fn processing_mask(&self, mask: u8) {
        self.send(ProgressEvent::ProcessingMask(mask));
    }

    fn summarizing_started(&self, size: usize) {
        self.send(ProgressEvent::SummarizingStarted(size));
    }

    fn analysing_range(&self, entry: &str) {
        self.send(ProgressEvent::AnalysingRange(entry.to_string()));
    }
}

/// The registered observers of one summarizer.
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Box<dyn SummarizerListener>>,
}

impl Listeners {
    pub fn new() -> Listeners {
        Listeners::default()
    }

    pub fn add(&mut self, listener: Box<dyn SummarizerListener>) {
        self.listeners.push(listener);
    }

    pub fn publish_mask_started(&self, mask: u8) {
        for l in &self.listeners {
            l.processing_mask(mask);
        }
    }

    pub fn publish_summarize_start(&self, size: usize) {
        for l in &self.listeners {
            l.summarizing_started(size);
        }
    }

    pub fn publish_range_analysis_started(&self, entry: &str) {
        for l in &self.listeners {
            l.analysing_range(entry);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listeners({})", self.listeners.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct MaskOnly;
    impl SummarizerListener for MaskOnly {}

    #[test]
    fn test_channel_listener_forwards_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut listeners = Listeners::new();
        listeners.add(Box::new(ChannelListener::new(tx)));
        listeners.add(Box::new(MaskOnly));
        listeners.add(Box::new(LogListener));
        assert_eq!(format!("{listeners:?}"), "Listeners(3)");

        listeners.publish_range_analysis_started("10.0.0.0/30");
        listeners.publish_summarize_start(2);
        listeners.publish_mask_started(8);
        drop(listeners);

        let events: Vec<ProgressEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                ProgressEvent::AnalysingRange("10.0.0.0/30".to_string()),
                ProgressEvent::SummarizingStarted(2),
                ProgressEvent::ProcessingMask(8),
            ]
        );
    }

    #[test]
    fn test_channel_listener_ignores_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let listener = ChannelListener::new(tx);
        listener.processing_mask(30);
    }

    #[test]
    fn test_progress_event_json() {
        let json = serde_json::to_string(&ProgressEvent::ProcessingMask(24)).unwrap();
        assert_eq!(json, r#"{"event":"processing_mask","value":24}"#);
    }
}
