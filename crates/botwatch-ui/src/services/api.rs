//! HTTP client helpers (REST).

use botwatch_models::{SERVICES_STATUS_PATH, ServicesStatus};
use gloo_net::http::Request;

/// Same-origin REST client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    /// Client for paths relative to `base_url` (empty for the page's origin).
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: for<'de> serde::Deserialize<'de>>(&self, path: &str) -> anyhow::Result<T> {
        let response = Request::get(&format!("{}{}", self.base_url, path))
            .send()
            .await?;
        if !response.ok() {
            anyhow::bail!("GET {path} returned HTTP {}", response.status());
        }
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn fetch_services_status(&self) -> anyhow::Result<ServicesStatus> {
        self.get_json(SERVICES_STATUS_PATH).await
    }
}
