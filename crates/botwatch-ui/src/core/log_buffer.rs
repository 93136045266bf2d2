//! Bounded, append-only buffer of received log lines.
//!
//! # Design
//! - Entries are classified once, on arrival, and never mutated afterwards.
//! - Ids keep increasing across `clear()` so rendered keys never collide.
//! - The oldest entries are evicted first once the buffer is full.

use std::collections::VecDeque;
use std::rc::Rc;

use botwatch_models::LogLevel;

use crate::core::filters::LevelFilter;

/// Lines retained by the log view.
pub const MAX_LOG_LINES: usize = 2000;

/// A received log line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Monotonic id, used as the render key.
    pub id: u64,
    /// Severity from the line prefix, `None` for unrecognised prefixes.
    pub level: Option<LogLevel>,
    /// Raw line as received.
    pub text: Rc<str>,
}

impl LogEntry {
    /// Class list for the rendered entry.
    #[must_use]
    pub fn css_classes(&self) -> String {
        match self.level {
            Some(level) => format!("log-entry {}", level.css_class()),
            None => "log-entry".to_string(),
        }
    }
}

/// Log lines received since the current connection opened.
#[derive(Clone, Debug)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(MAX_LOG_LINES)
    }
}

// Entries are immutable, so the id window identifies the content.
impl PartialEq for LogBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.next_id == other.next_id
            && self.entries.len() == other.entries.len()
            && self.entries.front().map(|entry| entry.id)
                == other.entries.front().map(|entry| entry.id)
    }
}

impl LogBuffer {
    /// Buffer holding at most `capacity` lines (minimum one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(MAX_LOG_LINES)),
            capacity,
            next_id: 0,
        }
    }

    /// Classify and append `line`, evicting the oldest entry when full.
    pub fn push(&mut self, line: impl Into<Rc<str>>) -> u64 {
        let text = line.into();
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            id,
            level: LogLevel::from_line(&text),
            text,
        });
        id
    }

    /// Drop every entry; ids keep counting.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in arrival order.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries the filter lets through, in arrival order.
    pub fn visible<'a>(&'a self, filter: &'a LevelFilter) -> impl Iterator<Item = &'a LogEntry> {
        self.entries
            .iter()
            .filter(move |entry| filter.allows(entry.level))
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been received since the last clear.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_classifies_by_prefix() {
        let mut buffer = LogBuffer::default();
        buffer.push("[ERR] - boom");
        buffer.push("plain text");
        let levels: Vec<_> = buffer.entries().map(|entry| entry.level).collect();
        assert_eq!(levels, vec![Some(LogLevel::Error), None]);
        let classes: Vec<_> = buffer.entries().map(LogEntry::css_classes).collect();
        assert_eq!(classes, vec!["log-entry err", "log-entry"]);
    }

    #[test]
    fn oldest_lines_are_evicted_first() {
        let mut buffer = LogBuffer::with_capacity(3);
        for idx in 0..5 {
            buffer.push(format!("[INF] {idx}"));
        }
        let texts: Vec<_> = buffer.entries().map(|entry| entry.text.to_string()).collect();
        assert_eq!(texts, vec!["[INF] 2", "[INF] 3", "[INF] 4"]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn ids_survive_clear() {
        let mut buffer = LogBuffer::default();
        assert_eq!(buffer.push("[DEB] a"), 0);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.push("[DEB] b"), 1);
    }

    #[test]
    fn visible_respects_filter() {
        let mut buffer = LogBuffer::default();
        buffer.push("[DEB] noisy");
        buffer.push("[WAR] careful");
        buffer.push("untagged");
        let mut filter = LevelFilter::default();
        filter.set(LogLevel::Debug, false);
        let shown: Vec<_> = buffer
            .visible(&filter)
            .map(|entry| entry.text.to_string())
            .collect();
        assert_eq!(shown, vec!["[WAR] careful"]);
    }

    #[test]
    fn equality_tracks_appends_and_clears() {
        let mut buffer = LogBuffer::default();
        let before = buffer.clone();
        buffer.push("[INF] x");
        assert_ne!(buffer, before);
        let snapshot = buffer.clone();
        assert_eq!(buffer, snapshot);
        buffer.clear();
        assert_ne!(buffer, snapshot);
    }
}
