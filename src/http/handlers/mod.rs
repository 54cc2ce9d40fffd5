//! REST handlers.
//!
//! Each handler validates locally, builds one [`OutboundRequest`], and hands
//! it to [`dispatch_and_wait`]. Validation failures short-circuit without
//! touching the dispatcher.

pub mod cats;
pub mod favorites;
pub mod votes;

use axum::{body::Bytes, extract::rejection::BytesRejection, response::Response};
use serde::de::DeserializeOwned;

use crate::dispatch::OutboundRequest;
use crate::http::response::{error_response, outcome_response};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resilience::await_with_deadline;

/// Submit `request` and render whichever comes first: its outcome or the
/// deadline.
pub(crate) async fn dispatch_and_wait(
    state: &AppState,
    route: &'static str,
    request: OutboundRequest,
) -> Response {
    let channel = state.dispatcher.submit(request);
    let result = await_with_deadline(channel, state.deadline).await;

    if result.is_err() {
        metrics::record_timeout(route);
    }

    outcome_response(result)
}

/// Short-circuit with `{"error": message}`.
pub(crate) fn reject(route: &'static str, message: &str) -> Response {
    tracing::warn!(route, error = message, "Rejected before dispatch");
    metrics::record_validation_rejection(route);
    error_response(message)
}

/// Decode a JSON request body, short-circuiting with the matching error.
///
/// A body that could not be buffered (including one over the size limit)
/// reads as invalid. A literal `null` decodes as an empty object.
pub(crate) fn parse_body<T>(
    route: &'static str,
    body: Result<Bytes, BytesRejection>,
) -> Result<T, Response>
where
    T: DeserializeOwned + Default,
{
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(route, error = %e, "Failed to read request body");
            return Err(reject(route, "Invalid request body"));
        }
    };

    if body.is_empty() {
        return Err(reject(route, "Empty request body"));
    }

    match serde_json::from_slice::<Option<T>>(&body) {
        Ok(parsed) => Ok(parsed.unwrap_or_default()),
        Err(e) => {
            tracing::error!(route, error = %e, "Failed to parse request body");
            Err(reject(route, "Invalid request body"))
        }
    }
}
