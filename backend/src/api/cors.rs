//! Cross-origin policy
//!
//! Any origin may call the proxy. `OPTIONS` requests are answered by the layer
//! itself with an empty 200, so they never reach body parsing or validation.

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderName, Method,
};
use tower_http::cors::{Any, CorsLayer};

/// Request headers a browser may send to the proxy
pub const ALLOWED_REQUEST_HEADERS: [HeaderName; 4] = [
    AUTHORIZATION,
    HeaderName::from_static("x-client-info"),
    HeaderName::from_static("apikey"),
    CONTENT_TYPE,
];

/// Build the CORS layer applied to every route
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_REQUEST_HEADERS)
}
