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
//! Host process for the Botwatch dashboard.
//!
//! Serves the compiled dashboard bundle, reports liveness of registered
//! background services, and streams the process log to browsers over a
//! websocket.

pub mod config;
pub mod error;
pub mod http;
pub mod registry;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use http::router::DashboardServer;
pub use http::state::DashboardState;
pub use registry::{ServiceRegistry, heartbeat};

use botwatch_telemetry::init_logging;
use tracing::{info, warn};

const HEARTBEAT_SERVICE: &str = "heartbeat";

/// Load configuration from the environment and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration is invalid, logging cannot be installed,
/// or the listener fails.
pub async fn run() -> ServerResult<()> {
    let config = ServerConfig::from_env()?;
    run_dashboard(config, ServiceRegistry::new()).await
}

/// Serve the dashboard for `registry` with the supplied configuration.
///
/// Embedding hosts register their own services on `registry` before or after
/// calling this; the built-in heartbeat is added when enabled.
///
/// # Errors
///
/// Returns an error if logging cannot be installed or the listener fails.
pub async fn run_dashboard(config: ServerConfig, registry: ServiceRegistry) -> ServerResult<()> {
    let relay = init_logging(&config.logging())
        .map_err(|source| ServerError::telemetry("init_logging", source))?;
    info!(
        bind = %config.bind_addr,
        assets = %config.assets_dir.display(),
        "botwatch starting"
    );

    if let Some(period) = config.heartbeat {
        registry.spawn(HEARTBEAT_SERVICE, heartbeat(period));
    }

    let state = DashboardState::new(registry.clone(), relay, config.assets_dir.clone());
    let result = DashboardServer::new(state)
        .serve(config.bind_addr, shutdown_signal())
        .await;
    registry.shutdown();
    info!("botwatch stopped");
    result
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!(error = %err, "ctrl-c handler unavailable; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
