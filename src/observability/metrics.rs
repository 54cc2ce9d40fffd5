//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_upstream_calls_total` (counter): dispatches by endpoint root, method and outcome kind
//! - `gateway_upstream_duration_seconds` (histogram): dispatch latency by method
//! - `gateway_timeouts_total` (counter): inbound calls that hit the deadline, by route
//! - `gateway_validation_rejections_total` (counter): requests short-circuited before dispatch, by route
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_upstream_call(
    endpoint_root: &str,
    method: &str,
    kind: &'static str,
    started: Instant,
) {
    counter!(
        "gateway_upstream_calls_total",
        "endpoint_root" => endpoint_root.to_string(),
        "method" => method.to_string(),
        "kind" => kind
    )
    .increment(1);
    histogram!("gateway_upstream_duration_seconds", "method" => method.to_string())
        .record(started.elapsed().as_secs_f64());
}

pub fn record_timeout(route: &'static str) {
    counter!("gateway_timeouts_total", "route" => route).increment(1);
}

pub fn record_validation_rejection(route: &'static str) {
    counter!("gateway_validation_rejections_total", "route" => route).increment(1);
}
