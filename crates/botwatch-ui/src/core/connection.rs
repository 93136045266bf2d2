//! Log socket connection state as shown in the connection bar.

/// Why the log socket is not connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The server closed the socket.
    Closed,
    /// The socket reported an error.
    Error,
    /// The socket could not be constructed at all.
    OpenFailed,
}

/// Lifecycle of the single log socket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// A socket is being opened.
    #[default]
    Connecting,
    /// The socket is open and streaming.
    Connected,
    /// No socket is open; the user may reconnect.
    Disconnected {
        /// What ended the previous attempt.
        reason: DisconnectReason,
    },
}

impl ConnectionState {
    /// Whether the loading indicator is visible.
    #[must_use]
    pub const fn shows_spinner(self) -> bool {
        matches!(self, Self::Connecting)
    }

    /// Whether the reconnect button is visible.
    #[must_use]
    pub const fn shows_reconnect(self) -> bool {
        matches!(self, Self::Disconnected { .. })
    }

    /// Translation key for the connection label, if one is shown.
    #[must_use]
    pub const fn label_key(self) -> Option<&'static str> {
        match self {
            Self::Connecting => None,
            Self::Connected => Some("connection.connected"),
            Self::Disconnected { .. } => Some("connection.disconnected"),
        }
    }

    /// Translation key for the status text next to the reconnect button.
    ///
    /// A socket that could not even be constructed reads "Reconnect failed"
    /// rather than collapsing into the generic "Connection failed".
    #[must_use]
    pub const fn status_key(self) -> Option<&'static str> {
        match self {
            Self::Connecting | Self::Connected => None,
            Self::Disconnected {
                reason: DisconnectReason::Closed | DisconnectReason::Error,
            } => Some("connection.failed"),
            Self::Disconnected {
                reason: DisconnectReason::OpenFailed,
            } => Some("connection.retry_failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connecting_shows_only_the_spinner() {
        let state = ConnectionState::Connecting;
        assert!(state.shows_spinner());
        assert!(!state.shows_reconnect());
        assert_eq!(state.label_key(), None);
        assert_eq!(state.status_key(), None);
    }

    #[test]
    fn connected_clears_status_text() {
        let state = ConnectionState::Connected;
        assert!(!state.shows_spinner());
        assert!(!state.shows_reconnect());
        assert_eq!(state.label_key(), Some("connection.connected"));
        assert_eq!(state.status_key(), None);
    }

    #[test]
    fn disconnect_reasons_pick_status_text() {
        let closed = ConnectionState::Disconnected {
            reason: DisconnectReason::Closed,
        };
        let errored = ConnectionState::Disconnected {
            reason: DisconnectReason::Error,
        };
        let failed = ConnectionState::Disconnected {
            reason: DisconnectReason::OpenFailed,
        };
        for state in [closed, errored, failed] {
            assert!(state.shows_reconnect());
            assert!(!state.shows_spinner());
            assert_eq!(state.label_key(), Some("connection.disconnected"));
        }
        assert_eq!(closed.status_key(), Some("connection.failed"));
        assert_eq!(errored.status_key(), Some("connection.failed"));
        assert_eq!(failed.status_key(), Some("connection.retry_failed"));
    }
}
