//! Bounded diagnostic event log
//!
//! Fixed-capacity, insertion-ordered trail of operational events. The log
//! evicts its oldest entry beyond capacity and pushes a copy of every new
//! entry to live subscribers with a non-blocking send: a slow or absent
//! subscriber drops events, it never stalls the recording caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Maximum entries retained in the log
pub const EVENT_LOG_CAPACITY: usize = 100;

/// Default window returned by `recent` consumers
pub const DEFAULT_RECENT_LIMIT: usize = 25;

/// One recorded diagnostic event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// Event name, e.g. `create_prediction_requested`
    pub event: String,

    /// Structured event payload
    pub payload: serde_json::Value,

    /// Recording time (ISO-8601 in JSON)
    pub timestamp: DateTime<Utc>,
}

/// Bounded FIFO event trail with live subscriber notification
pub struct EventLog {
    entries: RwLock<VecDeque<EventLogEntry>>,
    subscribers: RwLock<Vec<mpsc::Sender<EventLogEntry>>>,
    capacity: usize,
    echo: bool,
}

impl EventLog {
    /// Create a log with the standard capacity
    pub fn new(echo: bool) -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY, echo)
    }

    /// Create a log with an explicit capacity (used by tests)
    pub fn with_capacity(capacity: usize, echo: bool) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            subscribers: RwLock::new(Vec::new()),
            capacity,
            echo,
        }
    }

    /// Record an event. Always succeeds: eviction keeps the log bounded
    /// and subscriber notification is fire-and-forget.
    pub fn record(&self, event: &str, payload: serde_json::Value) -> EventLogEntry {
        let entry = EventLogEntry {
            event: event.to_string(),
            payload,
            timestamp: Utc::now(),
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.push_back(entry.clone());
            while entries.len() > self.capacity {
                entries.pop_front();
            }
        }

        self.notify_subscribers(&entry);

        if self.echo {
            tracing::info!("📒 {} {}", entry.event, entry.payload);
        }

        entry
    }

    /// Most recent `limit` entries in insertion order (oldest of the
    /// selected window first), clamped to what is stored.
    pub fn recent(&self, limit: usize) -> Vec<EventLogEntry> {
        match self.entries.read() {
            Ok(entries) => {
                let skip = entries.len().saturating_sub(limit);
                entries.iter().skip(skip).cloned().collect()
            }
            Err(_) => Vec::new(),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a live subscriber; each new entry is copied into the
    /// returned channel with a non-blocking send.
    pub fn subscribe(&self, buffer: usize) -> mpsc::Receiver<EventLogEntry> {
        let (sender, receiver) = mpsc::channel(buffer);
        if let Ok(mut subscribers) = self.subscribers.write() {
            subscribers.push(sender);
        }
        receiver
    }

    fn notify_subscribers(&self, entry: &EventLogEntry) {
        if let Ok(mut subscribers) = self.subscribers.write() {
            // Full channels drop the event; closed channels are pruned
            subscribers.retain(|subscriber| {
                !matches!(
                    subscriber.try_send(entry.clone()),
                    Err(TrySendError::Closed(_))
                )
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capacity_eviction_is_fifo() {
        let log = EventLog::new(false);
        for i in 1..=105 {
            log.record("tick", json!({ "seq": i }));
        }

        assert_eq!(log.len(), EVENT_LOG_CAPACITY);

        // Entries 1..=5 were evicted; 6..=105 remain in order
        let window = log.recent(EVENT_LOG_CAPACITY);
        assert_eq!(window.len(), 100);
        assert_eq!(window.first().unwrap().payload["seq"], 6);
        assert_eq!(window.last().unwrap().payload["seq"], 105);
    }

    #[test]
    fn test_recent_window_order_and_clamp() {
        let log = EventLog::new(false);
        for i in 1..=10 {
            log.record("tick", json!({ "seq": i }));
        }

        let window = log.recent(3);
        let seqs: Vec<_> = window.iter().map(|e| e.payload["seq"].as_i64().unwrap()).collect();
        assert_eq!(seqs, vec![8, 9, 10]);

        // Oversized limit returns everything stored, oldest first
        let all = log.recent(1000);
        assert_eq!(all.len(), 10);
        assert_eq!(all.first().unwrap().payload["seq"], 1);
    }

    #[test]
    fn test_recent_does_not_mutate() {
        let log = EventLog::new(false);
        log.record("one", json!({}));
        log.record("two", json!({}));

        let _ = log.recent(1);
        let _ = log.recent(1);
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn test_subscriber_receives_copies() {
        let log = EventLog::new(false);
        let mut receiver = log.subscribe(8);

        log.record("wallet_initialized", json!({ "network": "preview" }));

        let entry = receiver.recv().await.unwrap();
        assert_eq!(entry.event, "wallet_initialized");
        assert_eq!(entry.payload["network"], "preview");
    }

    #[tokio::test]
    async fn test_full_subscriber_drops_without_blocking() {
        let log = EventLog::new(false);
        let mut receiver = log.subscribe(1);

        log.record("first", json!({}));
        log.record("second", json!({}));
        log.record("third", json!({}));

        // Only the first event fit the buffer; the rest were dropped,
        // but every event was still recorded in the log itself.
        let entry = receiver.recv().await.unwrap();
        assert_eq!(entry.event, "first");
        assert_eq!(log.len(), 3);
    }

    #[tokio::test]
    async fn test_closed_subscriber_is_pruned() {
        let log = EventLog::new(false);
        let receiver = log.subscribe(1);
        drop(receiver);

        // Recording after the receiver is gone neither fails nor leaks
        log.record("after_close", json!({}));
        log.record("again", json!({}));
        assert_eq!(log.len(), 2);
    }
}
