//! Named background services and their liveness.
//!
//! # Design
//! - A service is alive while its task has not finished.
//! - Registering a name twice aborts the previous task; names stay unique.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use botwatch_models::ServicesStatus;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Registry of spawned services shared with the HTTP handlers.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: Arc<Mutex<BTreeMap<String, JoinHandle<()>>>>,
}

impl ServiceRegistry {
    /// Build an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `future` on the current runtime and track it under `name`.
    pub fn spawn<F>(&self, name: impl Into<String>, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.register(name, tokio::spawn(future));
    }

    /// Track an already spawned task under `name`.
    pub fn register(&self, name: impl Into<String>, handle: JoinHandle<()>) {
        let name = name.into();
        info!(service = %name, "service starting");
        if let Some(previous) = self.services().insert(name.clone(), handle) {
            debug!(service = %name, "replacing previous service task");
            previous.abort();
        }
    }

    /// Liveness of every registered service.
    #[must_use]
    pub fn snapshot(&self) -> ServicesStatus {
        self.services()
            .iter()
            .map(|(name, handle)| (name.clone(), !handle.is_finished()))
            .collect()
    }

    /// Abort every registered task.
    pub fn shutdown(&self) {
        for (name, handle) in self.services().iter() {
            if !handle.is_finished() {
                debug!(service = %name, "aborting service");
                handle.abort();
            }
        }
    }

    fn services(&self) -> MutexGuard<'_, BTreeMap<String, JoinHandle<()>>> {
        self.services.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Periodic debug line proving the log pipeline is flowing end to end.
pub async fn heartbeat(period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.tick().await;
    let mut beats = 0u64;
    loop {
        ticker.tick().await;
        beats = beats.saturating_add(1);
        debug!(beats, "heartbeat");
    }
}
