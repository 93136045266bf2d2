//! Telemetry initialisation primitives and logging configuration.
//!
//! # Design
//! - Centralises logging setup (dashboard lines or JSON) with a single entry point.
//! - The relay layer always uses the dashboard format so socket clients can classify lines,
//!   independent of what stdout carries.

use std::str::FromStr;

use tracing::Subscriber;
use tracing_subscriber::fmt::format::DefaultFields;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, TelemetryError};
use crate::format::DashboardFormat;
use crate::log_stream::{DEFAULT_HISTORY_CAPACITY, LogRelay, LogStreamMakeWriter};

type RelayLayer<S> = fmt::Layer<S, DefaultFields, DashboardFormat, LogStreamMakeWriter>;

/// Default logging target when `RUST_LOG` is not provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Log level string (e.g., `info`, `debug`).
    pub level: &'a str,
    /// Output format for stdout.
    pub format: LogFormat,
    /// Lines retained for replay to new dashboard clients.
    pub history_capacity: usize,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::Dashboard,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Available stdout formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `[LVL] - timestamp - target - message` lines, identical to the relay output.
    Dashboard,
    /// Structured JSON objects.
    Json,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dashboard" | "text" => Ok(Self::Dashboard),
            "json" => Ok(Self::Json),
            _ => Err(TelemetryError::UnknownFormat {
                value: value.to_string(),
            }),
        }
    }
}

/// Configure and install the global tracing subscriber.
///
/// Returns the relay fed by every event that passes the level filter.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be installed (for example,
/// because another subscriber has already been set globally).
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<LogRelay> {
    let relay = LogRelay::new(config.history_capacity);

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .with(relay_layer(&relay))
            .try_init(),
        LogFormat::Dashboard => tracing_subscriber::registry()
            .with(build_env_filter(config.level))
            .with(fmt::layer().event_format(DashboardFormat::default()))
            .with(relay_layer(&relay))
            .try_init(),
    }
    .map_err(|source| TelemetryError::SubscriberInstall { source })?;

    Ok(relay)
}

/// Fmt layer writing dashboard lines into `relay`, one frame per event.
fn relay_layer<S>(relay: &LogRelay) -> RelayLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .event_format(DashboardFormat::default())
        .with_writer(relay.make_writer())
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use botwatch_models::LogLevel;

    #[test]
    fn log_format_parses_known_names() -> Result<()> {
        assert_eq!("json".parse::<LogFormat>()?, LogFormat::Json);
        assert_eq!(" Dashboard ".parse::<LogFormat>()?, LogFormat::Dashboard);
        assert_eq!("text".parse::<LogFormat>()?, LogFormat::Dashboard);
        assert!(matches!(
            "pretty".parse::<LogFormat>(),
            Err(TelemetryError::UnknownFormat { .. })
        ));
        Ok(())
    }

    #[test]
    fn default_config_uses_dashboard_lines() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.format, LogFormat::Dashboard);
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
    }

    #[test]
    fn relay_layer_keeps_multi_line_errors_in_one_frame() {
        let relay = LogRelay::new(8);
        let subscriber = tracing_subscriber::registry().with(relay_layer(&relay));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(
                "Traceback (most recent call last):\n  File \"bot.py\", line 1\nValueError: boom"
            );
        });

        let backlog = relay.subscribe().backlog;
        assert_eq!(backlog.len(), 1);
        let frame = &backlog[0];
        assert_eq!(LogLevel::from_line(frame), Some(LogLevel::Error));
        assert!(frame.ends_with("\nValueError: boom"), "unexpected frame: {frame}");
    }

    #[test]
    fn init_logging_installs_subscriber_once() {
        let config = LoggingConfig {
            level: "info",
            format: LogFormat::Dashboard,
            history_capacity: 4,
        };
        let _first = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::SubscriberInstall { .. })
        ));
    }
}
