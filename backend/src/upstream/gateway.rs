//! AI gateway client
//!
//! Direct HTTP client for an OpenAI-style `/chat/completions` endpoint.
//! Requests are always streamed; the response body is handed back as a chunk
//! stream without being read here.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::StatusCode;

use crate::chat::models::CompletionRequest;
use crate::config::GatewayConfig;
use crate::upstream::{ChunkStream, CompletionUpstream, UpstreamError};

/// Gateway client backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Create a client with its own connection pool
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client that reuses an existing `reqwest::Client`
    pub fn with_client(http: reqwest::Client, config: GatewayConfig) -> Self {
        Self { http, config }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl CompletionUpstream for GatewayClient {
    async fn stream_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChunkStream, UpstreamError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey)?;

        let url = self.completions_url();
        tracing::debug!(
            url = %url,
            model = %request.model,
            message_count = request.messages.len(),
            "Calling AI gateway"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_failure(status, response).await);
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(UpstreamError::from))
            .boxed();
        Ok(stream)
    }
}

async fn classify_failure(status: StatusCode, response: reqwest::Response) -> UpstreamError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            tracing::warn!(status_code = status.as_u16(), "AI gateway rate limit hit");
            UpstreamError::RateLimited
        }
        StatusCode::PAYMENT_REQUIRED => {
            tracing::warn!(status_code = status.as_u16(), "AI gateway credits exhausted");
            UpstreamError::QuotaExhausted
        }
        _ => {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!(
                status_code = status.as_u16(),
                error_body = %body,
                "AI gateway returned error status"
            );
            UpstreamError::Status {
                status: status.as_u16(),
                body,
            }
        }
    }
}
