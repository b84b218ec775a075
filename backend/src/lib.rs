//! Library Chat Proxy
//!
//! Streaming chat-completion proxy for the digital library's Bible study
//! assistant. Exposes modules for testing and for the `chat_client` binary.
//! The server binary is in `src/main.rs`.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
/// Shared router state
pub mod state;
pub mod upstream;
