//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::resilience::DEFAULT_DEADLINE;

/// Fallback subscriber id used when none is configured.
pub const DEFAULT_SUB_ID: &str = "default-user-id";

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, TLS, body limit).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Maximum accepted inbound request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every endpoint is appended to (e.g., "https://api.thecatapi.com/v1").
    pub api_base_url: String,

    /// Key sent as `x-api-key` on every upstream call.
    pub cat_api_key: String,

    /// Subscriber id used when a request does not name one.
    pub sub_id: String,

    /// Upper bound on how long an inbound call waits for the upstream, in seconds.
    pub request_timeout_secs: u64,

    /// Transport connect timeout, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            cat_api_key: String::new(),
            sub_id: DEFAULT_SUB_ID.to_string(),
            request_timeout_secs: DEFAULT_DEADLINE.as_secs(),
            connect_timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.listener.max_body_bytes, 1024 * 1024);
        assert_eq!(config.upstream.sub_id, DEFAULT_SUB_ID);
        assert_eq!(config.upstream.request_timeout_secs, 10);
        assert_eq!(
            Duration::from_secs(config.upstream.request_timeout_secs),
            DEFAULT_DEADLINE
        );
        assert!(config.upstream.api_base_url.is_empty());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [upstream]
            api_base_url = "https://api.thecatapi.com/v1"
            cat_api_key = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.api_base_url, "https://api.thecatapi.com/v1");
        assert_eq!(config.upstream.cat_api_key, "secret");
        assert_eq!(config.upstream.sub_id, DEFAULT_SUB_ID);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
