//! HTTP client helpers for tests.

use rerank::gateway::{ErrorResponse, HealthResponse, RerankResponse, RootResponse};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub async fn rerank(
        &self,
        body: &serde_json::Value,
    ) -> Result<RerankResponse, TestClientError> {
        let resp = self.client.post(self.url("/rerank")).json(body).send().await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            status => {
                let error: ErrorResponse = resp.json().await?;
                Err(TestClientError::Status(status, error.detail))
            }
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.error_for_status()?.json().await?)
    }

    pub async fn root(&self) -> Result<RootResponse, TestClientError> {
        let resp = self.client.get(self.url("/")).send().await?;
        Ok(resp.error_for_status()?.json().await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}: {1}")]
    Status(u16, String),
}
