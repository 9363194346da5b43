//! reqwest-backed implementation of [`AgentBackend`].

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::backend::AgentBackend;
use super::error::ApiError;
use super::types::{ChatRequest, ChatResponse, ExamplesResponse, ServerStatus};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// HTTP client for the agent backend.
///
/// The base address is fixed for the lifetime of the client; every request
/// goes to `{base_url}/<endpoint>`.
pub struct HttpAgentClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAgentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Checks the status code and decodes the JSON body.
    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        debug!("{} response status: {}", endpoint, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("{} returned HTTP {}: {}", endpoint, status, message);
            return Err(ApiError::Api { status, message });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(endpoint, response).await
    }
}

#[async_trait]
impl AgentBackend for HttpAgentClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn check_health(&self) -> Result<ServerStatus, ApiError> {
        info!("Health probe: GET {}", self.url("health"));
        self.get("health").await
    }

    async fn fetch_examples(&self) -> Result<Vec<String>, ApiError> {
        info!("Fetching examples: GET {}", self.url("examples"));
        let payload: ExamplesResponse = self.get("examples").await?;
        debug!("Received {} examples", payload.examples.len());
        Ok(payload.examples)
    }

    async fn send_message(&self, text: &str) -> Result<String, ApiError> {
        info!("Sending message: POST {} ({} bytes)", self.url("chat"), text.len());
        let response = self
            .client
            .post(self.url("chat"))
            .json(&ChatRequest { message: text })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let payload: ChatResponse = Self::decode("chat", response).await?;
        debug!("Agent replied with {} bytes", payload.response.len());
        Ok(payload.response)
    }
}
