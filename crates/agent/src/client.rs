//! HTTP client for the relay's host-facing endpoints.

use figbridge_core::protocol::{
    Command, PollResponse, RegisterRequest, RegisterResponse, ResultAck, ResultReport,
};

/// Errors talking to the relay.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The HTTP request itself failed (connection refused, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The relay answered with a non-2xx status.
    #[error("Relay returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client for one relay, shared across polls.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /plugin/register`.
    pub async fn register(
        &self,
        host_id: &str,
        version: Option<&str>,
    ) -> Result<RegisterResponse, AgentError> {
        let body = RegisterRequest {
            file_key: host_id.to_string(),
            plugin_version: version.map(str::to_string),
        };
        let response = self
            .client
            .post(format!("{}/plugin/register", self.base_url))
            .json(&body)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// `GET /commands/{host_id}`. Everything returned has been removed
    /// from the relay's queue.
    pub async fn poll(&self, host_id: &str) -> Result<Vec<Command>, AgentError> {
        let response = self
            .client
            .get(format!("{}/commands/{host_id}", self.base_url))
            .send()
            .await?;
        let body: PollResponse = Self::parse(response).await?;
        Ok(body.commands)
    }

    /// `POST /results`.
    pub async fn post_result(&self, report: &ResultReport) -> Result<ResultAck, AgentError> {
        let response = self
            .client
            .post(format!("{}/results", self.base_url))
            .json(report)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AgentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}
