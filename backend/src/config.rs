//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. The resulting `Config` is handed to the router as
//! state; request handlers never read the environment themselves.

use std::env;
use std::fmt;

use crate::chat::persona::DEFAULT_PERSONA;

/// Default upstream gateway base URL
pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";

/// Default model requested from the gateway
pub const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-2.5-flash";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Upstream gateway configuration
    pub gateway: GatewayConfig,
    /// Chat behavior configuration
    pub chat: ChatConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Upstream chat-completion gateway configuration
#[derive(Clone)]
pub struct GatewayConfig {
    /// Bearer token for the gateway. Checked per request, not at startup.
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Model name sent in every completion request
    pub model: String,
}

// Hand-written so the API key never reaches the logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GATEWAY_BASE_URL.to_string(),
            model: DEFAULT_GATEWAY_MODEL.to_string(),
        }
    }
}

/// Chat configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// System persona prepended to every forwarded conversation
    pub persona: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            gateway: GatewayConfig {
                api_key: env::var("AI_GATEWAY_API_KEY")
                    .ok()
                    .filter(|k| !k.trim().is_empty()),
                base_url: env::var("AI_GATEWAY_BASE_URL")
                    .map(|u| u.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| DEFAULT_GATEWAY_BASE_URL.to_string()),
                model: env::var("AI_GATEWAY_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GATEWAY_MODEL.to_string()),
            },
            chat: ChatConfig {
                persona: env::var("CHAT_PERSONA")
                    .ok()
                    .filter(|p| !p.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_PERSONA.to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "PORT",
        "HOST",
        "AI_GATEWAY_API_KEY",
        "AI_GATEWAY_BASE_URL",
        "AI_GATEWAY_MODEL",
        "CHAT_PERSONA",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert!(config.gateway.api_key.is_none());
        assert_eq!(config.gateway.base_url, DEFAULT_GATEWAY_BASE_URL);
        assert_eq!(config.gateway.model, DEFAULT_GATEWAY_MODEL);
        assert_eq!(config.chat.persona, DEFAULT_PERSONA);
    }

    #[test]
    #[serial]
    fn test_overrides_from_env() {
        clear_env();
        env::set_var("PORT", "9000");
        env::set_var("HOST", "127.0.0.1");
        env::set_var("AI_GATEWAY_API_KEY", "secret");
        env::set_var("AI_GATEWAY_BASE_URL", "http://localhost:1234/v1/");
        env::set_var("CHAT_PERSONA", "You are terse.");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.server_addr(), "127.0.0.1:9000");
        assert_eq!(config.gateway.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gateway.base_url, "http://localhost:1234/v1");
        assert_eq!(config.chat.persona, "You are terse.");
    }

    #[test]
    #[serial]
    fn test_blank_api_key_is_unset() {
        clear_env();
        env::set_var("AI_GATEWAY_API_KEY", "   ");
        let config = Config::from_env();
        clear_env();

        assert!(config.gateway.api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let gateway = GatewayConfig {
            api_key: Some("super-secret".to_string()),
            ..GatewayConfig::default()
        };
        let printed = format!("{:?}", gateway);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
