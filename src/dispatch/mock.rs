//! Call-recording dispatcher for tests.
//!
//! Records every submit keyed by `(endpoint, method)` and answers from a table
//! of canned responses. A key can also be held open so its channel never
//! yields, which is how timeouts are exercised without a slow upstream.

use std::collections::HashMap;
use std::sync::Mutex;

use axum::body::Bytes;
use axum::http::Method;
use serde_json::Value;

use crate::dispatch::channel::{completion_channel, Completion, CompletionChannel};
use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::outcome::Outcome;
use crate::dispatch::request::OutboundRequest;

/// Body returned for keys without a canned response.
pub const DEFAULT_RESPONSE: &str = r#"{"status":"success"}"#;

/// One recorded submit.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub method: Method,
    pub payload: Option<Value>,
}

#[derive(Debug, Clone)]
enum Stub {
    Respond(Bytes),
    Hold,
}

type Key = (String, Method);

#[derive(Default)]
struct MockState {
    calls: HashMap<Key, Vec<RecordedCall>>,
    total: usize,
    stubs: HashMap<Key, Stub>,
    held: Vec<Completion>,
}

/// Record-and-stub [`Dispatcher`].
#[derive(Default)]
pub struct RecordingDispatcher {
    state: Mutex<MockState>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `(endpoint, method)` with `response` from now on.
    pub fn set_response(&self, endpoint: &str, method: Method, response: impl Into<Bytes>) {
        let mut state = self.lock();
        state
            .stubs
            .insert((endpoint.to_string(), method), Stub::Respond(response.into()));
    }

    /// Never answer `(endpoint, method)`; the channel stays open until
    /// [`clear`](Self::clear) or drop.
    pub fn hold(&self, endpoint: &str, method: Method) {
        let mut state = self.lock();
        state.stubs.insert((endpoint.to_string(), method), Stub::Hold);
    }

    /// Calls made to `(endpoint, method)`, oldest first.
    pub fn calls(&self, endpoint: &str, method: Method) -> Vec<RecordedCall> {
        let state = self.lock();
        state
            .calls
            .get(&(endpoint.to_string(), method))
            .cloned()
            .unwrap_or_default()
    }

    pub fn total_calls(&self) -> usize {
        self.lock().total
    }

    /// Forget recorded calls and release held channels. Stubs are kept.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.calls.clear();
        state.total = 0;
        state.held.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("recording dispatcher mutex poisoned")
    }
}

impl Dispatcher for RecordingDispatcher {
    fn submit(&self, request: OutboundRequest) -> CompletionChannel {
        let supported = request.has_supported_method();
        let (endpoint, method, payload) = request.into_parts();
        let key = (endpoint.clone(), method.clone());
        let call = RecordedCall {
            endpoint,
            method,
            payload,
        };

        let mut state = self.lock();
        state.calls.entry(key.clone()).or_default().push(call);
        state.total += 1;

        if !supported {
            return CompletionChannel::ready(Outcome::invalid_method());
        }

        match state.stubs.get(&key).cloned() {
            Some(Stub::Respond(bytes)) => CompletionChannel::ready(Outcome::upstream(bytes)),
            Some(Stub::Hold) => {
                let (completion, channel) = completion_channel();
                state.held.push(completion);
                channel
            }
            None => CompletionChannel::ready(Outcome::upstream(DEFAULT_RESPONSE)),
        }
    }
}
