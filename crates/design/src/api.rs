//! REST client for the Figma HTTP API.
//!
//! Every request carries the personal access token in the `X-Figma-Token`
//! header. Failures are returned as-is; nothing here retries.

use serde::Serialize;

/// Public Figma API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1";

/// HTTP client for the Figma REST API.
pub struct FigmaApi {
    client: reqwest::Client,
    api_base: String,
    access_token: String,
}

/// Errors from the Figma REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum FigmaApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Figma returned a non-2xx status code.
    #[error("Figma API error: {status} - {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Body of `POST /files/{key}/comments`.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_meta: Option<ClientMeta>,
}

/// Where a comment is pinned: a node, a canvas offset, or both.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_offset: Option<NodeOffset>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NodeOffset {
    pub x: f64,
    pub y: f64,
}

impl NewComment {
    /// Build a comment, pinning it to `node_id` and/or an `(x, y)` offset
    /// when given. The offset is only attached when both coordinates are
    /// present.
    pub fn new(message: String, node_id: Option<String>, x: Option<f64>, y: Option<f64>) -> Self {
        let node_offset = match (x, y) {
            (Some(x), Some(y)) => Some(NodeOffset { x, y }),
            _ => None,
        };
        let client_meta = if node_id.is_some() || node_offset.is_some() {
            Some(ClientMeta {
                node_id: node_id.map(|id| vec![id]),
                node_offset,
            })
        } else {
            None
        };
        Self {
            message,
            client_meta,
        }
    }
}

impl FigmaApi {
    /// Create a client against `api_base`, e.g. [`DEFAULT_API_BASE`].
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base, access_token)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_base: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Fetch a file's document tree.
    ///
    /// Sends `GET /files/{file_key}`, limited to `depth` levels when given.
    pub async fn get_file(
        &self,
        file_key: &str,
        depth: Option<u32>,
    ) -> Result<serde_json::Value, FigmaApiError> {
        let mut request = self.get(&format!("/files/{file_key}"));
        if let Some(depth) = depth {
            request = request.query(&[("depth", depth)]);
        }
        Self::parse_response(request.send().await?).await
    }

    /// List comments on a file (`GET /files/{file_key}/comments`).
    pub async fn get_comments(&self, file_key: &str) -> Result<serde_json::Value, FigmaApiError> {
        let response = self.get(&format!("/files/{file_key}/comments")).send().await?;
        Self::parse_response(response).await
    }

    /// Post a comment on a file (`POST /files/{file_key}/comments`).
    pub async fn post_comment(
        &self,
        file_key: &str,
        comment: &NewComment,
    ) -> Result<serde_json::Value, FigmaApiError> {
        let response = self
            .client
            .post(format!("{}/files/{file_key}/comments", self.api_base))
            .header("X-Figma-Token", &self.access_token)
            .json(comment)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Render nodes to images (`GET /images/{file_key}`).
    ///
    /// Returns the API's `{ images: { node_id: url } }` map untouched.
    pub async fn export_images(
        &self,
        file_key: &str,
        node_ids: &[String],
        format: &str,
        scale: f64,
    ) -> Result<serde_json::Value, FigmaApiError> {
        let response = self
            .get(&format!("/images/{file_key}"))
            .query(&[("ids", node_ids.join(",")), ("format", format.to_string())])
            .query(&[("scale", scale)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.api_base))
            .header("X-Figma-Token", &self.access_token)
    }

    /// Turn a non-2xx response into [`FigmaApiError::ApiError`] carrying
    /// the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, FigmaApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), "Figma API request failed");
            return Err(FigmaApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, FigmaApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }
}
