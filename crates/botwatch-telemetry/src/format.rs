//! Dashboard line format.
//!
//! # Design
//! - One event renders to one record: `[LVL] - timestamp - target - fields`.
//! - The bracketed prefix is the only part the dashboard interprets.

use std::fmt;

use botwatch_models::LogLevel;
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity prefix for a tracing level. `TRACE` folds into `[DEB]`.
#[must_use]
pub fn level_prefix(level: &Level) -> &'static str {
    dashboard_level(level).prefix()
}

fn dashboard_level(level: &Level) -> LogLevel {
    if *level == Level::ERROR {
        LogLevel::Error
    } else if *level == Level::WARN {
        LogLevel::Warn
    } else if *level == Level::INFO {
        LogLevel::Info
    } else {
        LogLevel::Debug
    }
}

/// `FormatEvent` producing prefixed lines understood by the dashboard.
#[derive(Clone, Copy, Debug, Default)]
pub struct DashboardFormat {
    omit_timestamp: bool,
}

impl DashboardFormat {
    /// Drop the timestamp column; used where output must be deterministic.
    #[must_use]
    pub const fn without_timestamp(mut self) -> Self {
        self.omit_timestamp = true;
        self
    }
}

impl<S, N> FormatEvent<S, N> for DashboardFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        write!(writer, "{} - ", level_prefix(metadata.level()))?;
        if !self.omit_timestamp {
            write!(writer, "{} - ", Local::now().format(TIMESTAMP_FORMAT))?;
        }
        write!(writer, "{} - ", metadata.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
