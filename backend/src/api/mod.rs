//! API module
//!
//! HTTP handlers, middleware and the router for the chat proxy.

pub mod chat;
pub mod cors;
pub mod middleware;
pub mod streaming;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Largest accepted request body: 50 messages of 10,000 characters each,
/// with room for multi-byte characters and JSON escaping.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/chat", post(chat::handle_chat_request))
        // Path used by the web client
        .route(
            "/functions/v1/chat-biblico",
            post(chat::handle_chat_request),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(cors::cors_layer())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
