// Application state
// Injected configuration and the upstream client; cloned into every handler

use std::sync::Arc;

use crate::config::Config;
use crate::upstream::{CompletionUpstream, GatewayClient};

/// Shared router state
///
/// Holds no mutable data, so it is cloned per request without locking.
#[derive(Clone)]
pub struct AppState {
    /// System persona prepended to every conversation
    pub persona: Arc<str>,
    /// Model requested from the upstream gateway
    pub model: Arc<str>,
    /// Upstream completion service
    pub upstream: Arc<dyn CompletionUpstream>,
}

impl AppState {
    /// Create state from explicit parts
    pub fn new(
        persona: impl Into<Arc<str>>,
        model: impl Into<Arc<str>>,
        upstream: Arc<dyn CompletionUpstream>,
    ) -> Self {
        Self {
            persona: persona.into(),
            model: model.into(),
            upstream,
        }
    }

    /// Create state backed by the real gateway client
    pub fn from_config(config: &Config) -> Self {
        let client = GatewayClient::new(config.gateway.clone());
        Self::new(
            config.chat.persona.as_str(),
            config.gateway.model.as_str(),
            Arc::new(client),
        )
    }
}
