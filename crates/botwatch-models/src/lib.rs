#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Shared wire types for the Botwatch dashboard.
//!
//! The dashboard page and the host that serves it agree on exactly two
//! contracts: the service liveness document and the severity prefix carried
//! by every streamed log line. Both live here so neither side drifts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Path of the dashboard page itself.
pub const DASHBOARD_PATH: &str = "/status";
/// Polled endpoint returning [`ServicesStatus`].
pub const SERVICES_STATUS_PATH: &str = "/api/services_status";
/// Socket endpoint streaming plain-text log lines.
pub const WEBSOCKET_PATH: &str = "/websocket";
/// Local storage key holding the persisted colour mode.
pub const MODE_STORAGE_KEY: &str = "mode";

/// Severity derived from the bracketed prefix of a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// `[DEB]` lines.
    Debug,
    /// `[INF]` lines.
    Info,
    /// `[WAR]` lines.
    Warn,
    /// `[ERR]` lines.
    Error,
}

impl LogLevel {
    /// All severities, least severe first.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Debug, Self::Info, Self::Warn, Self::Error]
    }

    /// Three-letter tag used inside the prefix brackets.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Debug => "DEB",
            Self::Info => "INF",
            Self::Warn => "WAR",
            Self::Error => "ERR",
        }
    }

    /// Full line prefix, brackets included.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Debug => "[DEB]",
            Self::Info => "[INF]",
            Self::Warn => "[WAR]",
            Self::Error => "[ERR]",
        }
    }

    /// CSS class attached to rendered entries of this severity.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Debug => "deb",
            Self::Info => "inf",
            Self::Warn => "war",
            Self::Error => "err",
        }
    }

    /// Human label for filter controls.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warn => "Warn",
            Self::Error => "Error",
        }
    }

    /// Classify a line by its leading prefix.
    ///
    /// Matching is exact and case-sensitive at byte zero; leading whitespace
    /// disqualifies the line.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|level| line.starts_with(level.prefix()))
    }
}

/// Liveness document keyed by service name.
///
/// Serialised as a flat JSON object (`{"name": true}`); iteration order is
/// the lexical order of the names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServicesStatus(BTreeMap<String, bool>);

impl ServicesStatus {
    /// Build an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record the liveness of a service, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, alive: bool) {
        self.0.insert(name.into(), alive);
    }

    /// Liveness of a single service, if it is known.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Number of services in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document lists no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(name, alive)` pairs in display order.
    pub fn lines(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, alive)| (name.as_str(), *alive))
    }
}

impl FromIterator<(String, bool)> for ServicesStatus {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Word rendered next to a service name.
#[must_use]
pub const fn status_word(alive: bool) -> &'static str {
    if alive { "Alive" } else { "Dead" }
}
