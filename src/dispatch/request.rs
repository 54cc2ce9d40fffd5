//! Outbound request description.

use axum::http::Method;
use serde_json::Value;

/// One logical upstream call: an endpoint relative to the configured base
/// URL, a method, and an optional JSON payload.
///
/// Immutable once built; the dispatcher takes ownership on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    endpoint: String,
    method: Method,
    payload: Option<Value>,
}

impl OutboundRequest {
    pub fn new(endpoint: impl Into<String>, method: Method, payload: Option<Value>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            payload,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Method::GET, None)
    }

    pub fn post(endpoint: impl Into<String>, payload: Value) -> Self {
        Self::new(endpoint, Method::POST, Some(payload))
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Method::DELETE, None)
    }

    /// Endpoint path (and query) relative to the base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// First path segment of the endpoint, used as a low-cardinality label.
    pub fn endpoint_root(&self) -> &str {
        self.endpoint.split(['/', '?']).next().unwrap_or_default()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Whether the method is one the upstream accepts (GET, POST, DELETE).
    pub fn has_supported_method(&self) -> bool {
        is_supported_method(&self.method)
    }

    /// Build the absolute target URL as `{base_url}/{endpoint}`.
    pub fn target_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url, self.endpoint)
    }

    pub fn into_parts(self) -> (String, Method, Option<Value>) {
        (self.endpoint, self.method, self.payload)
    }
}

pub fn is_supported_method(method: &Method) -> bool {
    *method == Method::GET || *method == Method::POST || *method == Method::DELETE
}

/// Percent-encode a single query value or path segment.
pub fn encode_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
