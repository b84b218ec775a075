//! Error types and error handling for the proxy
//!
//! Every failure path of the chat endpoint is a `ProxyError`. Each variant maps to
//! a fixed HTTP status and a `{ "error": ... }` JSON body via `IntoResponse`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by the chat proxy endpoint
///
/// The first five variants are client-input errors detected before any
/// upstream call. The next three are translated upstream statuses.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Body has no `messages` field, or it is not an array
    #[error("Invalid messages format. Expected an array.")]
    InvalidFormat,

    /// `messages` is empty or longer than the allowed maximum
    #[error("Messages count must be between 1 and 50.")]
    InvalidCount,

    /// A message lacks `role` or has a missing/falsy `content`
    #[error("Each message must have 'role' and 'content' properties.")]
    InvalidMessageShape,

    /// `content` is not a string or exceeds the character limit
    #[error("Message content must be a string with maximum 10,000 characters.")]
    ContentTooLarge,

    /// `role` is outside the user/assistant/system set
    #[error("Message role must be 'user', 'assistant', or 'system'.")]
    InvalidRole,

    /// Upstream gateway answered 429
    #[error("Limite de uso excedido. Tente novamente em alguns instantes.")]
    RateLimited,

    /// Upstream gateway answered 402
    #[error("Créditos esgotados. Por favor, adicione créditos ao workspace.")]
    QuotaExhausted,

    /// Any other non-success upstream status
    #[error("Erro ao processar sua pergunta")]
    UpstreamFailure,

    /// Unexpected failure while processing the request
    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidFormat
            | ProxyError::InvalidCount
            | ProxyError::InvalidMessageShape
            | ProxyError::ContentTooLarge
            | ProxyError::InvalidRole => StatusCode::BAD_REQUEST,
            ProxyError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            ProxyError::UpstreamFailure | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
