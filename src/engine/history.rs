//! Button Event History Window
//!
//! A time-bounded, size-bounded ring of recent button-release events.
//! Sequence matching only ever inspects this window, so pruning on every
//! append keeps both memory and scan cost fixed regardless of uptime.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// A recorded button event: key identity plus append timestamp
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Stable button identity (e.g. `button_3`)
    pub key_type: String,
    /// Time the event was appended
    pub at: Instant,
}

/// Bounded window of recent button events, newest last.
///
/// Entries older than the sequence timeout relative to the newest append
/// are dropped, and the window never holds more than `cap` entries.
#[derive(Debug)]
pub struct HistoryWindow {
    entries: VecDeque<HistoryEntry>,
    timeout: Duration,
    cap: usize,
}

impl HistoryWindow {
    /// Create an empty window with the given timeout and entry cap
    pub fn new(timeout: Duration, cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            timeout,
            cap,
        }
    }

    /// Append an event and prune the window.
    ///
    /// Pruning drops entries from the front while the oldest entry
    /// predates `now - timeout`, then enforces the entry cap.
    pub fn record(&mut self, key_type: &str, now: Instant) {
        self.entries.push_back(HistoryEntry {
            key_type: key_type.to_string(),
            at: now,
        });

        let cutoff = now.checked_sub(self.timeout);
        if let Some(cutoff) = cutoff {
            while self
                .entries
                .front()
                .is_some_and(|entry| entry.at < cutoff)
            {
                self.entries.pop_front();
            }
        }

        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    /// Number of entries currently in the window
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in chronological order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recent `n` entries in chronological order
    pub fn tail(&self, n: usize) -> Vec<&HistoryEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> HistoryWindow {
        HistoryWindow::new(Duration::from_millis(500), 20)
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut w = window();
        let now = Instant::now();
        w.record("button_0", now);
        w.record("button_1", now + Duration::from_millis(10));

        let keys: Vec<_> = w.iter().map(|e| e.key_type.as_str()).collect();
        assert_eq!(keys, vec!["button_0", "button_1"]);
    }

    #[test]
    fn test_prune_drops_stale_entries() {
        let mut w = window();
        let now = Instant::now();
        w.record("button_0", now);
        w.record("button_1", now + Duration::from_millis(100));
        // Gap longer than the timeout: both earlier entries expire
        w.record("button_2", now + Duration::from_millis(700));

        let keys: Vec<_> = w.iter().map(|e| e.key_type.as_str()).collect();
        assert_eq!(keys, vec!["button_2"]);
    }

    #[test]
    fn test_entry_at_exact_cutoff_survives() {
        let mut w = window();
        let now = Instant::now();
        w.record("button_0", now);
        w.record("button_1", now + Duration::from_millis(500));
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn test_cap_bounds_window_size() {
        let mut w = HistoryWindow::new(Duration::from_secs(60), 20);
        let now = Instant::now();
        for i in 0..25 {
            w.record("button_0", now + Duration::from_millis(i));
        }
        assert_eq!(w.len(), 20);
    }

    #[test]
    fn test_tail_returns_most_recent_chronologically() {
        let mut w = window();
        let now = Instant::now();
        w.record("button_0", now);
        w.record("button_1", now + Duration::from_millis(10));
        w.record("button_2", now + Duration::from_millis(20));

        let tail: Vec<_> = w.tail(2).iter().map(|e| e.key_type.clone()).collect();
        assert_eq!(tail, vec!["button_1", "button_2"]);

        // Asking for more than we have returns everything
        assert_eq!(w.tail(10).len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut w = window();
        w.record("button_0", Instant::now());
        w.clear();
        assert!(w.is_empty());
    }
}
