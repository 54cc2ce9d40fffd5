//! The single result produced per outbound request.

use axum::body::Bytes;
use serde_json::json;

/// Body synthesized when a request names a method the upstream does not take.
pub const INVALID_METHOD_MESSAGE: &str = "Invalid HTTP method";
/// Body synthesized when the transport fails.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to fetch data";

/// How an [`Outcome`] came to be. The bytes alone do not tell a real upstream
/// body apart from a synthesized error, so this travels alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Verbatim upstream response body, whatever its status.
    Upstream,
    /// No call was made: unsupported method.
    InvalidMethod,
    /// The call was attempted and the transport failed.
    TransportFailure,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Upstream => "upstream",
            OutcomeKind::InvalidMethod => "invalid_method",
            OutcomeKind::TransportFailure => "transport_failure",
        }
    }
}

/// Response bytes for one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    bytes: Bytes,
    kind: OutcomeKind,
}

impl Outcome {
    pub fn upstream(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            kind: OutcomeKind::Upstream,
        }
    }

    pub fn invalid_method() -> Self {
        Self {
            bytes: error_body(INVALID_METHOD_MESSAGE),
            kind: OutcomeKind::InvalidMethod,
        }
    }

    pub fn transport_failure() -> Self {
        Self {
            bytes: error_body(TRANSPORT_FAILURE_MESSAGE),
            kind: OutcomeKind::TransportFailure,
        }
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Serialize `{"error": message}`.
pub fn error_body(message: &str) -> Bytes {
    Bytes::from(json!({ "error": message }).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_bodies() {
        let outcome = Outcome::invalid_method();
        assert_eq!(outcome.bytes().as_ref(), br#"{"error":"Invalid HTTP method"}"#);
        assert_eq!(outcome.kind(), OutcomeKind::InvalidMethod);

        let outcome = Outcome::transport_failure();
        assert_eq!(outcome.bytes().as_ref(), br#"{"error":"Failed to fetch data"}"#);
    }

    #[test]
    fn test_upstream_bytes_untouched() {
        let raw = b"not json at all".to_vec();
        let outcome = Outcome::upstream(raw.clone());
        assert_eq!(outcome.kind(), OutcomeKind::Upstream);
        assert_eq!(outcome.into_bytes().to_vec(), raw);
    }
}
