//! Severity checkboxes for the log view.

use botwatch_models::LogLevel;

/// Which severities are visible. All four start enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelFilter {
    debug: bool,
    info: bool,
    warn: bool,
    error: bool,
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self {
            debug: true,
            info: true,
            warn: true,
            error: true,
        }
    }
}

impl LevelFilter {
    /// Whether the checkbox for `level` is checked.
    #[must_use]
    pub const fn is_enabled(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Debug => self.debug,
            LogLevel::Info => self.info,
            LogLevel::Warn => self.warn,
            LogLevel::Error => self.error,
        }
    }

    /// Update the checkbox for `level`.
    pub const fn set(&mut self, level: LogLevel, enabled: bool) {
        match level {
            LogLevel::Debug => self.debug = enabled,
            LogLevel::Info => self.info = enabled,
            LogLevel::Warn => self.warn = enabled,
            LogLevel::Error => self.error = enabled,
        }
    }

    /// Visibility of an entry with the given classification.
    ///
    /// Entries without a recognised prefix are never shown.
    #[must_use]
    pub const fn allows(&self, level: Option<LogLevel>) -> bool {
        match level {
            Some(level) => self.is_enabled(level),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_classified_is_visible_by_default() {
        let filter = LevelFilter::default();
        for level in LogLevel::all() {
            assert!(filter.allows(Some(level)));
        }
    }

    #[test]
    fn unclassified_entries_are_hidden() {
        assert!(!LevelFilter::default().allows(None));
    }

    #[test]
    fn unchecking_hides_only_that_level() {
        let mut filter = LevelFilter::default();
        filter.set(LogLevel::Debug, false);
        assert!(!filter.allows(Some(LogLevel::Debug)));
        assert!(filter.allows(Some(LogLevel::Info)));
        assert!(filter.allows(Some(LogLevel::Warn)));
        assert!(filter.allows(Some(LogLevel::Error)));

        filter.set(LogLevel::Debug, true);
        assert_eq!(filter, LevelFilter::default());
    }
}
