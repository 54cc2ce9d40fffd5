//! Dispatcher capability and its network implementation.
//!
//! # Responsibilities
//! - Turn an [`OutboundRequest`] into exactly one upstream call
//! - Run the call off the caller's task
//! - Normalize success and failure into one [`Outcome`]

use std::sync::Arc;
use std::time::Instant;

use axum::http::{header, Method};
use thiserror::Error;

use crate::config::ConfigReader;
use crate::dispatch::channel::{completion_channel, CompletionChannel};
use crate::dispatch::outcome::Outcome;
use crate::dispatch::request::OutboundRequest;
use crate::observability::metrics;

/// Header carrying the upstream API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Capability to submit an upstream call.
///
/// `submit` returns immediately; the outcome arrives on the returned channel.
pub trait Dispatcher: Send + Sync {
    fn submit(&self, request: OutboundRequest) -> CompletionChannel;
}

/// Errors constructing a dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Dispatcher that talks to the configured upstream over HTTP.
#[derive(Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    config: Arc<ConfigReader>,
}

impl HttpDispatcher {
    /// Build a dispatcher with its own HTTP client.
    pub fn new(config: Arc<ConfigReader>) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: Arc<ConfigReader>) -> Self {
        Self { client, config }
    }
}

impl Dispatcher for HttpDispatcher {
    fn submit(&self, request: OutboundRequest) -> CompletionChannel {
        let (completion, channel) = completion_channel();
        let client = self.client.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            let outcome = perform(&client, &config, request).await;
            if !completion.complete(outcome) {
                tracing::debug!("Outcome arrived after the caller stopped waiting; discarded");
            }
        });

        channel
    }
}

/// Issue the upstream call and collapse its result into an [`Outcome`].
async fn perform(client: &reqwest::Client, config: &ConfigReader, request: OutboundRequest) -> Outcome {
    let started = Instant::now();
    let method_label = request.method().to_string();
    let endpoint_root = request.endpoint_root().to_string();

    if !request.has_supported_method() {
        tracing::error!(method = %request.method(), endpoint = %request.endpoint(), "Invalid HTTP method");
        let outcome = Outcome::invalid_method();
        metrics::record_upstream_call(&endpoint_root, &method_label, outcome.kind().as_str(), started);
        return outcome;
    }

    let url = request.target_url(&config.base_url());
    let (endpoint, method, payload) = request.into_parts();

    let mut builder = client
        .request(method.clone(), &url)
        .header(API_KEY_HEADER, config.api_key())
        .header(header::CONTENT_TYPE, "application/json");

    if method == Method::POST {
        if let Some(payload) = &payload {
            builder = builder.json(payload);
        }
    }

    tracing::debug!(endpoint = %endpoint, method = %method, "Calling upstream");

    let outcome = match builder.send().await {
        Ok(response) => {
            let status = response.status();
            match response.bytes().await {
                Ok(bytes) => {
                    tracing::debug!(
                        endpoint = %endpoint,
                        status = %status,
                        bytes = bytes.len(),
                        "Upstream responded"
                    );
                    Outcome::upstream(bytes)
                }
                Err(e) => {
                    tracing::error!(endpoint = %endpoint, error = %e, "Error reading upstream body");
                    Outcome::transport_failure()
                }
            }
        }
        Err(e) => {
            tracing::error!(endpoint = %endpoint, error = %e, "Error in API request");
            Outcome::transport_failure()
        }
    };

    metrics::record_upstream_call(&endpoint_root, &method_label, outcome.kind().as_str(), started);
    outcome
}
