//! Router construction and server host for the dashboard.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    http::Request,
    routing::{get, get_service},
};
use botwatch_models::{DASHBOARD_PATH, SERVICES_STATUS_PATH, WEBSOCKET_PATH};
use tokio::net::TcpListener;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

use crate::error::{ServerError, ServerResult};
use crate::http::socket::stream_logs;
use crate::http::state::DashboardState;
use crate::http::status::services_status;

const INDEX_FILE: &str = "index.html";

/// Axum router wrapper that hosts the dashboard page, its API and the log socket.
pub struct DashboardServer {
    router: Router,
}

impl DashboardServer {
    /// Wire every route against the shared handler state.
    #[must_use]
    pub fn new(state: DashboardState) -> Self {
        let index = state.assets_dir.join(INDEX_FILE);
        let assets = ServeDir::new(&state.assets_dir);
        let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                route = %request.uri().path(),
            )
        });

        let router = Router::new()
            .route("/", get_service(ServeFile::new(&index)))
            .route(DASHBOARD_PATH, get_service(ServeFile::new(&index)))
            .route(SERVICES_STATUS_PATH, get(services_status))
            .route(WEBSOCKET_PATH, get(stream_logs))
            .fallback_service(assets)
            .layer(trace_layer)
            .with_state(Arc::new(state));

        Self { router }
    }

    /// Serve on `addr` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] when the listener cannot bind and
    /// [`ServerError::Serve`] when the accept loop fails.
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        info!(%addr, "dashboard listening");
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ServerError::Serve { source })
    }

    #[cfg(test)]
    pub(crate) fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ServiceRegistry;
    use axum::body::{Body, to_bytes};
    use axum::http::StatusCode;
    use botwatch_telemetry::LogRelay;
    use std::error::Error;
    use tower::ServiceExt;

    fn server_with_assets() -> Result<(DashboardServer, ServiceRegistry, tempfile::TempDir), Box<dyn Error>> {
        let assets = tempfile::tempdir()?;
        std::fs::write(assets.path().join(INDEX_FILE), "<html>botwatch</html>")?;
        std::fs::write(assets.path().join("app.css"), "body{}")?;
        let registry = ServiceRegistry::new();
        let state = DashboardState::new(registry.clone(), LogRelay::new(8), assets.path());
        Ok((DashboardServer::new(state), registry, assets))
    }

    async fn get_path(server: &DashboardServer, path: &str) -> Result<(StatusCode, String), Box<dyn Error>> {
        let response = server
            .router()
            .oneshot(Request::builder().uri(path).body(Body::empty())?)
            .await?;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, String::from_utf8(body.to_vec())?))
    }

    #[tokio::test]
    async fn dashboard_page_is_served_at_root_and_status() -> Result<(), Box<dyn Error>> {
        let (server, _registry, _assets) = server_with_assets()?;
        for path in ["/", DASHBOARD_PATH] {
            let (status, body) = get_path(&server, path).await?;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert_eq!(body, "<html>botwatch</html>");
        }
        Ok(())
    }

    #[tokio::test]
    async fn static_assets_fall_through_to_bundle_dir() -> Result<(), Box<dyn Error>> {
        let (server, _registry, _assets) = server_with_assets()?;
        let (status, body) = get_path(&server, "/app.css").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body{}");
        let (missing, _) = get_path(&server, "/missing.js").await?;
        assert_eq!(missing, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn services_status_returns_registry_snapshot() -> Result<(), Box<dyn Error>> {
        let (server, registry, _assets) = server_with_assets()?;
        registry.spawn("weather", std::future::pending::<()>());
        let (status, body) = get_path(&server, SERVICES_STATUS_PATH).await?;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body)?;
        assert_eq!(json, serde_json::json!({ "weather": true }));
        registry.shutdown();
        Ok(())
    }

    #[tokio::test]
    async fn websocket_route_requires_upgrade() -> Result<(), Box<dyn Error>> {
        let (server, _registry, _assets) = server_with_assets()?;
        let (status, _) = get_path(&server, WEBSOCKET_PATH).await?;
        assert!(status.is_client_error());
        Ok(())
    }

    #[tokio::test]
    async fn bind_failure_is_reported() -> Result<(), Box<dyn Error>> {
        let occupied = TcpListener::bind("127.0.0.1:0").await?;
        let addr = occupied.local_addr()?;
        let (server, _registry, _assets) = server_with_assets()?;
        let result = server.serve(addr, std::future::ready(())).await;
        assert!(matches!(result, Err(ServerError::Bind { addr: failed, .. }) if failed == addr));
        Ok(())
    }
}
