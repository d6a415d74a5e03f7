//! Bounded, newest-first event log.
//!
//! The log is a display concern of the host: it holds human-readable lines
//! describing each decision plus a few housekeeping messages. Once `capacity`
//! entries are held, each new entry evicts the oldest one.

use std::collections::VecDeque;

use chrono::Utc;
use cordpull_types::{LogEntry, LogEntryId, LogEntryKind};

/// Message appended after the log is cleared.
pub const CLEARED_MESSAGE: &str = "Event log cleared.";

/// Newest-first ring of [`LogEntry`] values.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl EventLog {
    /// Create an empty log. A zero capacity is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of retained entries.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend an entry, evicting the oldest one past capacity.
    ///
    /// Returns a copy of the stored entry.
    pub fn push(&mut self, kind: LogEntryKind, message: impl Into<String>) -> LogEntry {
        let entry = LogEntry {
            id: LogEntryId::new(),
            timestamp: Utc::now(),
            kind,
            message: message.into(),
        };
        self.entries.push_front(entry.clone());
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
        entry
    }

    /// Remove every entry, then record that the log was cleared.
    pub fn clear(&mut self) -> LogEntry {
        self.entries.clear();
        self.push(LogEntryKind::System, CLEARED_MESSAGE)
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The newest `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        self.entries.iter().take(limit).cloned().collect()
    }
}
