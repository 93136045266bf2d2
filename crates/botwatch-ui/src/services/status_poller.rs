//! Fixed-rate liveness polling.
//!
//! # Design
//! - One fetch per tick, no retries; the next tick is the retry.
//! - Failures are logged and leave the last good snapshot on screen.
//! - Responses may land out of order; whichever lands last wins.

use botwatch_models::ServicesStatus;
use gloo::console;
use gloo_timers::callback::Interval;
use yew::Callback;

use crate::services::api::ApiClient;

/// Poll period for `/api/services_status`.
pub(crate) const POLL_INTERVAL_MS: u32 = 1000;

/// Start polling; dropping the returned interval stops it.
pub(crate) fn start_status_poller(client: ApiClient, on_status: Callback<ServicesStatus>) -> Interval {
    Interval::new(POLL_INTERVAL_MS, move || {
        let client = client.clone();
        let on_status = on_status.clone();
        yew::platform::spawn_local(async move {
            match client.fetch_services_status().await {
                Ok(status) => on_status.emit(status),
                Err(err) => console::error!(format!("Error fetching service status: {err}")),
            }
        });
    })
}
