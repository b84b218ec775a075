//! Chat request validation
//!
//! Validates a raw JSON body against the chat request contract. Checks run in
//! a fixed order and stop at the first failure, so nothing is forwarded for a
//! request that fails any of them.

use serde_json::Value;
use tracing::warn;

use crate::chat::models::{ChatMessage, Role};
use crate::error::ProxyError;

/// Maximum number of messages in one request
pub const MAX_MESSAGES: usize = 50;

/// Maximum message content length, in UTF-16 code units
///
/// Browsers measure string length in UTF-16 units, so an emoji outside the
/// Basic Multilingual Plane counts as two.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Parse and validate a raw request body
///
/// # Returns
/// * `Ok(Vec<ChatMessage>)` - The conversation, in caller order
/// * `Err(ProxyError)` - `Internal` if the body is not JSON at all, otherwise
///   the first validation failure
pub fn parse_chat_body(raw: &[u8]) -> Result<Vec<ChatMessage>, ProxyError> {
    let body: Value = serde_json::from_slice(raw).map_err(|e| {
        warn!(error = %e, "Request body is not valid JSON");
        ProxyError::Internal(format!("Invalid JSON body: {}", e))
    })?;

    validate_chat_body(&body)
}

/// Validate an already parsed request body
///
/// # Arguments
/// * `body` - JSON value expected to hold a `messages` array
///
/// # Returns
/// * `Ok(Vec<ChatMessage>)` - Normalized messages (only `role` and `content` kept)
/// * `Err(ProxyError)` - The first failing check
pub fn validate_chat_body(body: &Value) -> Result<Vec<ChatMessage>, ProxyError> {
    let Some(messages) = body.get("messages").and_then(Value::as_array) else {
        warn!("Invalid messages format");
        return Err(ProxyError::InvalidFormat);
    };

    if messages.is_empty() || messages.len() > MAX_MESSAGES {
        warn!(count = messages.len(), "Invalid messages count");
        return Err(ProxyError::InvalidCount);
    }

    messages
        .iter()
        .enumerate()
        .map(|(index, message)| validate_message(index, message))
        .collect()
}

fn validate_message(index: usize, message: &Value) -> Result<ChatMessage, ProxyError> {
    let role = message.get("role").filter(|r| is_truthy(r));
    let content = message.get("content").filter(|c| is_truthy(c));

    let (Some(role), Some(content)) = (role, content) else {
        warn!(index, "Invalid message structure");
        return Err(ProxyError::InvalidMessageShape);
    };

    let content = match content.as_str() {
        Some(text) if content_length(text) <= MAX_CONTENT_CHARS => text,
        other => {
            warn!(
                index,
                length = other.map(content_length),
                "Message content too long or not a string"
            );
            return Err(ProxyError::ContentTooLarge);
        }
    };

    let Some(role) = role.as_str().and_then(Role::from_name) else {
        warn!(index, role = %role, "Invalid message role");
        return Err(ProxyError::InvalidRole);
    };

    Ok(ChatMessage::new(role, content))
}

fn content_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// JSON truthiness: `null`, `false`, zero and the empty string are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
