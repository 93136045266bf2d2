//! Service liveness endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};
use botwatch_models::ServicesStatus;

use crate::http::state::DashboardState;

pub(crate) async fn services_status(State(state): State<Arc<DashboardState>>) -> Json<ServicesStatus> {
    Json(state.registry.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ServiceRegistry;
    use botwatch_telemetry::LogRelay;

    #[tokio::test]
    async fn reports_registered_services() {
        let registry = ServiceRegistry::new();
        registry.spawn("heartbeat", std::future::pending::<()>());
        let state = Arc::new(DashboardState::new(
            registry.clone(),
            LogRelay::new(1),
            "dist",
        ));

        let Json(status) = services_status(State(state)).await;
        assert_eq!(status.get("heartbeat"), Some(true));
        assert_eq!(status.len(), 1);
        registry.shutdown();
    }
}
