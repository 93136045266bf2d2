//! Environment-backed host configuration.
//!
//! # Design
//! - Every knob has a default so a bare `botwatch-server` starts on port 8000.
//! - Present-but-invalid values fail startup instead of silently falling back.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use botwatch_telemetry::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig,
};

use crate::error::{ServerError, ServerResult};

/// Listener address.
pub const BIND_ENV: &str = "BOTWATCH_BIND";
/// Directory holding the built dashboard (`index.html` plus wasm bundle).
pub const ASSETS_DIR_ENV: &str = "BOTWATCH_ASSETS_DIR";
/// Default level directive when `RUST_LOG` is unset.
pub const LOG_LEVEL_ENV: &str = "BOTWATCH_LOG_LEVEL";
/// Stdout log format (`dashboard` or `json`).
pub const LOG_FORMAT_ENV: &str = "BOTWATCH_LOG_FORMAT";
/// Lines replayed to new dashboard clients.
pub const LOG_HISTORY_ENV: &str = "BOTWATCH_LOG_HISTORY";
/// Heartbeat interval in seconds; `0` disables the heartbeat service.
pub const HEARTBEAT_SECS_ENV: &str = "BOTWATCH_HEARTBEAT_SECS";

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_ASSETS_DIR: &str = "crates/botwatch-ui/dist";
const DEFAULT_HEARTBEAT_SECS: u64 = 30;

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Root of the static dashboard bundle.
    pub assets_dir: PathBuf,
    /// Level directive handed to the subscriber.
    pub log_level: String,
    /// Stdout format.
    pub log_format: LogFormat,
    /// Relay history capacity.
    pub log_history: usize,
    /// Heartbeat period, `None` when disabled.
    pub heartbeat: Option<Duration>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidConfig`] when a variable is set to an unusable value.
    pub fn from_env() -> ServerResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidConfig`] when a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = read(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ServerError::invalid_config(BIND_ENV, "not_socket_addr", &bind_raw))?;

        let assets_dir = PathBuf::from(
            read(ASSETS_DIR_ENV).unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()),
        );

        let log_level = read(LOG_LEVEL_ENV).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let log_format = match read(LOG_FORMAT_ENV) {
            Some(value) => value
                .parse::<LogFormat>()
                .map_err(|_| ServerError::invalid_config(LOG_FORMAT_ENV, "unknown_format", value))?,
            None => LogFormat::Dashboard,
        };

        let log_history = match read(LOG_HISTORY_ENV) {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| ServerError::invalid_config(LOG_HISTORY_ENV, "not_integer", value))?,
            None => DEFAULT_HISTORY_CAPACITY,
        };

        let heartbeat_secs = match read(HEARTBEAT_SECS_ENV) {
            Some(value) => value.parse::<u64>().map_err(|_| {
                ServerError::invalid_config(HEARTBEAT_SECS_ENV, "not_integer", value)
            })?,
            None => DEFAULT_HEARTBEAT_SECS,
        };
        let heartbeat = (heartbeat_secs > 0).then(|| Duration::from_secs(heartbeat_secs));

        Ok(Self {
            bind_addr,
            assets_dir,
            log_level,
            log_format,
            log_history,
            heartbeat,
        })
    }

    /// Logging settings derived from this configuration.
    #[must_use]
    pub fn logging(&self) -> LoggingConfig<'_> {
        LoggingConfig {
            level: &self.log_level,
            format: self.log_format,
            history_capacity: self.log_history,
        }
    }
}
