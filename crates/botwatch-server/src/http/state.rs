//! Handler state shared across routes.

use std::path::PathBuf;

use botwatch_telemetry::LogRelay;

use crate::registry::ServiceRegistry;

/// Dependencies reachable from every handler.
#[derive(Clone)]
pub struct DashboardState {
    /// Services reported by the liveness endpoint.
    pub registry: ServiceRegistry,
    /// Source of streamed log lines.
    pub relay: LogRelay,
    /// Root of the static dashboard bundle.
    pub assets_dir: PathBuf,
}

impl DashboardState {
    /// Bundle handler dependencies.
    #[must_use]
    pub fn new(registry: ServiceRegistry, relay: LogRelay, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            relay,
            assets_dir: assets_dir.into(),
        }
    }
}
