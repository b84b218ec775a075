//! Chat proxy endpoint
//!
//! Flow: raw body -> validation -> persona prepended -> upstream gateway
//! (streamed) -> response body relayed chunk by chunk.
//!
//! Validation failures return before any upstream call. Upstream statuses are
//! translated into `ProxyError` variants; the upstream body is never echoed to
//! the caller.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Response,
};
use tracing::{info, warn};

use crate::api::streaming::create_sse_response;
use crate::chat::{build_outbound_conversation, parse_chat_body, CompletionRequest};
use crate::error::ProxyError;
use crate::state::AppState;

/// POST /chat - Validate a conversation and stream the upstream completion
pub async fn handle_chat_request(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ProxyError> {
    // Unreadable bodies (including ones over the size limit) get the same
    // `{ "error": ... }` shape as every other failure.
    let body = body.map_err(|rejection| {
        warn!(status = %rejection.status(), "Failed to read request body");
        ProxyError::Internal(rejection.body_text())
    })?;

    let messages = parse_chat_body(&body)?;

    info!(message_count = messages.len(), "Starting chat");

    let request = CompletionRequest::streaming(
        state.model.to_string(),
        build_outbound_conversation(&state.persona, messages),
    );

    let chunks = state.upstream.stream_completion(&request).await?;

    create_sse_response(chunks)
}
