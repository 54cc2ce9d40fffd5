//! Fallback-aware lookup over the upstream settings.

use std::time::Duration;

use crate::config::schema::{UpstreamConfig, DEFAULT_SUB_ID};

/// Read-only view of the upstream settings, shared by every handler and the
/// dispatcher.
#[derive(Debug, Clone)]
pub struct ConfigReader {
    upstream: UpstreamConfig,
}

impl ConfigReader {
    pub fn new(upstream: UpstreamConfig) -> Self {
        Self { upstream }
    }

    /// Look up a string setting by key.
    ///
    /// Returns `fallback` when the key is unknown or its value is empty.
    pub fn get(&self, key: &str, fallback: &str) -> String {
        let value = match key {
            "cat_api_key" => self.upstream.cat_api_key.as_str(),
            "api_base_url" => self.upstream.api_base_url.as_str(),
            "sub_id" => self.upstream.sub_id.as_str(),
            _ => "",
        };

        if value.is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    }

    pub fn api_key(&self) -> String {
        self.get("cat_api_key", "")
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> String {
        self.get("api_base_url", "").trim_end_matches('/').to_string()
    }

    pub fn sub_id(&self) -> String {
        self.get("sub_id", DEFAULT_SUB_ID)
    }

    /// Deadline applied by the bounded waiter.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.connect_timeout_secs)
    }
}

impl Default for ConfigReader {
    fn default() -> Self {
        Self::new(UpstreamConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_on_empty_and_unknown() {
        let mut upstream = UpstreamConfig::default();
        upstream.sub_id = String::new();
        let reader = ConfigReader::new(upstream);

        assert_eq!(reader.get("sub_id", "fallback"), "fallback");
        assert_eq!(reader.get("no_such_key", "fallback"), "fallback");
        assert_eq!(reader.sub_id(), DEFAULT_SUB_ID);
        assert_eq!(reader.api_key(), "");
    }

    #[test]
    fn test_configured_values_win() {
        let upstream = UpstreamConfig {
            api_base_url: "https://api.thecatapi.com/v1/".into(),
            cat_api_key: "k".into(),
            sub_id: "user-1".into(),
            ..UpstreamConfig::default()
        };
        let reader = ConfigReader::new(upstream);

        assert_eq!(reader.get("cat_api_key", "x"), "k");
        assert_eq!(reader.sub_id(), "user-1");
        assert_eq!(reader.base_url(), "https://api.thecatapi.com/v1");
        assert_eq!(reader.request_timeout(), Duration::from_secs(10));
    }
}
