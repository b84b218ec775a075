//! Upstream chat-completion gateway
//!
//! The proxy talks to the gateway through the `CompletionUpstream` trait so the
//! HTTP handler can be exercised against an in-process fake.

pub mod gateway;

use async_trait::async_trait;
use axum::body::Bytes;
use futures_util::stream::BoxStream;
use thiserror::Error;

use crate::chat::models::CompletionRequest;
use crate::error::ProxyError;

pub use gateway::GatewayClient;

/// Chunks of a streamed completion, in arrival order
pub type ChunkStream = BoxStream<'static, Result<Bytes, UpstreamError>>;

/// Errors raised while talking to the gateway
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No API key was configured
    #[error("AI gateway API key is not configured")]
    MissingApiKey,

    /// Gateway answered 429
    #[error("AI gateway rate limit exceeded")]
    RateLimited,

    /// Gateway answered 402
    #[error("AI gateway credits exhausted")]
    QuotaExhausted,

    /// Gateway answered with another non-success status
    #[error("AI gateway returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Request could not be sent or the stream broke
    #[error("AI gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::RateLimited => ProxyError::RateLimited,
            UpstreamError::QuotaExhausted => ProxyError::QuotaExhausted,
            UpstreamError::Status { .. } => ProxyError::UpstreamFailure,
            UpstreamError::MissingApiKey | UpstreamError::Transport(_) => {
                ProxyError::Internal(err.to_string())
            }
        }
    }
}

/// A service that turns a conversation into a streamed completion
#[async_trait]
pub trait CompletionUpstream: Send + Sync {
    /// Submit `request` and return the response body as a chunk stream
    ///
    /// Returns once the upstream status is known; the body is consumed lazily.
    async fn stream_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChunkStream, UpstreamError>;
}
