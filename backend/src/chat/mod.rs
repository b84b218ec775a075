//! Chat module
//!
//! Message types, request validation, the system persona, and decoding of the
//! streamed completion format.

pub mod models;
pub mod persona;
pub mod sse;
pub mod validation;

pub use models::{ChatMessage, CompletionRequest, Role};
pub use persona::build_outbound_conversation;
pub use sse::{SseDecoder, SseEvent};
pub use validation::{parse_chat_body, validate_chat_body};
