//! Response rendering.
//!
//! # Responsibilities
//! - Emit outcome bytes verbatim as `application/json`
//! - Render validation errors and timeouts as `{"error": ...}` bodies
//!
//! # Design Decisions
//! - Every response from this layer is HTTP 200; callers detect failure by
//!   inspecting the body, not the status code

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::dispatch::outcome::error_body;
use crate::dispatch::Outcome;
use crate::resilience::TimedOut;

/// Body returned when the deadline elapses.
pub const TIMEOUT_MESSAGE: &str = "Request timeout";

/// A JSON body sent with status 200.
#[derive(Debug, Clone)]
pub struct JsonBytes(pub Bytes);

impl IntoResponse for JsonBytes {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.0));
        *response.status_mut() = StatusCode::OK;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}

/// `{"error": message}` with status 200.
pub fn error_response(message: &str) -> Response {
    JsonBytes(error_body(message)).into_response()
}

/// Render the bounded waiter's result.
pub fn outcome_response(result: Result<Outcome, TimedOut>) -> Response {
    match result {
        Ok(outcome) => JsonBytes(outcome.into_bytes()).into_response(),
        Err(_) => error_response(TIMEOUT_MESSAGE),
    }
}
