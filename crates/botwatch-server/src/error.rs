//! # Design
//!
//! - Provide a single crate-level error type for bootstrap and serve failures.
//! - Keep error messages constant; capture operational context in structured fields.
//! - Preserve sources for diagnostics without double-logging.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result alias for host operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors raised while configuring or serving the dashboard host.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration value was present but unusable.
    #[error("invalid configuration")]
    InvalidConfig {
        /// Environment variable that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value.
        value: Option<String>,
    },
    /// Telemetry setup failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: botwatch_telemetry::TelemetryError,
    },
    /// Binding the listener failed.
    #[error("failed to bind dashboard listener")]
    Bind {
        /// Address attempted.
        addr: SocketAddr,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The server loop terminated with an error.
    #[error("dashboard server terminated unexpectedly")]
    Serve {
        /// Underlying IO error.
        source: io::Error,
    },
}

impl ServerError {
    pub(crate) fn invalid_config(
        field: &'static str,
        reason: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            field,
            reason,
            value: Some(value.into()),
        }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: botwatch_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn server_error_display_and_source() -> Result<(), Box<dyn Error>> {
        let bind = ServerError::Bind {
            addr: "127.0.0.1:8000".parse()?,
            source: io::Error::new(io::ErrorKind::AddrInUse, "busy"),
        };
        assert_eq!(bind.to_string(), "failed to bind dashboard listener");
        assert!(bind.source().is_some());

        let serve = ServerError::Serve {
            source: io::Error::new(io::ErrorKind::BrokenPipe, "lost"),
        };
        assert_eq!(serve.to_string(), "dashboard server terminated unexpectedly");
        assert!(serve.source().is_some());

        let invalid = ServerError::invalid_config("BOTWATCH_BIND", "not_socket_addr", "nope");
        assert_eq!(invalid.to_string(), "invalid configuration");
        assert!(invalid.source().is_none());
        assert!(matches!(
            invalid,
            ServerError::InvalidConfig {
                field: "BOTWATCH_BIND",
                ..
            }
        ));

        let telemetry = ServerError::telemetry(
            "init_logging",
            botwatch_telemetry::TelemetryError::UnknownFormat {
                value: "xml".to_string(),
            },
        );
        assert!(telemetry.source().is_some());
        Ok(())
    }
}
