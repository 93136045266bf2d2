//! App-wide yewdux store.
//!
//! # Design
//! - One store holds everything the status and logs pages share.
//! - Socket callbacks and the poller mutate it through small reducers so the
//!   transitions are testable without a browser.

use botwatch_models::{LogLevel, ServicesStatus};
use yewdux::store::Store;

use crate::core::connection::{ConnectionState, DisconnectReason};
use crate::core::filters::LevelFilter;
use crate::core::log_buffer::LogBuffer;
use crate::core::scroll::AutoScroll;

/// Global dashboard state.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct DashboardStore {
    /// Last successfully fetched liveness document; `None` before the first fetch.
    pub services: Option<ServicesStatus>,
    /// Log socket lifecycle.
    pub connection: ConnectionState,
    /// Severity checkboxes.
    pub filter: LevelFilter,
    /// Whether the log header (filter checkboxes) is expanded.
    pub header_expanded: bool,
    /// Lines received on the current connection.
    pub logs: LogBuffer,
    /// Log view pinning.
    pub scroll: AutoScroll,
}

impl DashboardStore {
    /// Replace the service list with a fresh snapshot (last write wins).
    pub fn apply_services(&mut self, status: ServicesStatus) {
        self.services = Some(status);
    }

    /// A new socket attempt has started.
    pub const fn begin_connect(&mut self) {
        self.connection = ConnectionState::Connecting;
    }

    /// The socket opened: start from an empty buffer pinned to the bottom.
    pub fn socket_opened(&mut self) {
        self.connection = ConnectionState::Connected;
        self.logs.clear();
        self.scroll.pin();
    }

    /// A line arrived on the socket.
    pub fn line_received(&mut self, line: String) {
        self.logs.push(line);
    }

    /// The socket ended or never opened.
    pub const fn socket_lost(&mut self, reason: DisconnectReason) {
        self.connection = ConnectionState::Disconnected { reason };
    }

    /// A severity checkbox changed.
    pub const fn set_level_visible(&mut self, level: LogLevel, visible: bool) {
        self.filter.set(level, visible);
    }

    /// The header collapse button was pressed.
    pub const fn toggle_header(&mut self) {
        self.header_expanded = !self.header_expanded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_buffer::LogEntry;

    #[test]
    fn defaults_match_a_fresh_page() {
        let store = DashboardStore::default();
        assert_eq!(store.services, None);
        assert_eq!(store.connection, ConnectionState::Connecting);
        assert_eq!(store.filter, LevelFilter::default());
        assert!(!store.header_expanded);
        assert!(store.logs.is_empty());
        assert!(store.scroll.is_pinned());
    }

    #[test]
    fn open_clears_previous_connection_lines() {
        let mut store = DashboardStore::default();
        store.socket_opened();
        store.line_received("[INF] - first session".to_string());
        store.socket_lost(DisconnectReason::Closed);
        assert_eq!(store.logs.len(), 1);

        store.begin_connect();
        store.scroll.observe(0, 100, 1000);
        store.socket_opened();
        assert_eq!(store.connection, ConnectionState::Connected);
        assert!(store.logs.is_empty());
        assert!(store.scroll.is_pinned());
    }

    #[test]
    fn services_are_replaced_wholesale() {
        let mut store = DashboardStore::default();
        let mut first = ServicesStatus::new();
        first.insert("chat", true);
        first.insert("weather", false);
        store.apply_services(first);

        let mut second = ServicesStatus::new();
        second.insert("chat", false);
        store.apply_services(second.clone());
        assert_eq!(store.services, Some(second));
    }

    #[test]
    fn header_and_filter_reducers() {
        let mut store = DashboardStore::default();
        store.toggle_header();
        assert!(store.header_expanded);
        store.set_level_visible(LogLevel::Warn, false);
        assert!(!store.filter.is_enabled(LogLevel::Warn));
        store.toggle_header();
        assert!(!store.header_expanded);
    }

    #[test]
    fn unchecking_error_hides_err_lines() {
        let mut store = DashboardStore::default();
        store.line_received("[ERR] - service weather crashed".to_string());
        store.line_received("[INF] - service weather restarted".to_string());
        let classes: Vec<_> = store.logs.entries().map(LogEntry::css_classes).collect();
        assert_eq!(classes, vec!["log-entry err", "log-entry inf"]);
        assert_eq!(store.logs.visible(&store.filter).count(), 2);

        store.set_level_visible(LogLevel::Error, false);
        let shown: Vec<_> = store
            .logs
            .visible(&store.filter)
            .map(|entry| entry.text.to_string())
            .collect();
        assert_eq!(shown, vec!["[INF] - service weather restarted"]);
        assert_eq!(store.logs.len(), 2);
    }
}
