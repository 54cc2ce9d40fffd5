//! HttpDispatcher against an in-process upstream.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use cat_gateway::config::{ConfigReader, UpstreamConfig};
use cat_gateway::dispatch::{Dispatcher, HttpDispatcher, OutboundRequest, Outcome, OutcomeKind};
use cat_gateway::resilience::{await_with_deadline, TimedOut};
use serde_json::json;

mod common;

use common::{refused_addr, start_mock_upstream, Reply};

fn dispatcher_for(base_url: String) -> HttpDispatcher {
    let upstream = UpstreamConfig {
        api_base_url: base_url,
        cat_api_key: "test-key".into(),
        ..UpstreamConfig::default()
    };
    HttpDispatcher::new(Arc::new(ConfigReader::new(upstream))).unwrap()
}

async fn submit_and_wait(dispatcher: &HttpDispatcher, request: OutboundRequest) -> Outcome {
    await_with_deadline(dispatcher.submit(request), Duration::from_secs(5))
        .await
        .expect("outcome before deadline")
}

#[tokio::test]
async fn test_get_returns_exact_bytes_with_headers() {
    let upstream = start_mock_upstream(Reply::ok(r#"[{"id":"abc","url":"http://x/cat.jpg"}]"#)).await;
    let dispatcher = dispatcher_for(format!("{}/v1", upstream.base_url()));

    let outcome = submit_and_wait(&dispatcher, OutboundRequest::get("images/search?limit=1")).await;

    assert_eq!(outcome.kind(), OutcomeKind::Upstream);
    assert_eq!(
        outcome.bytes().as_ref(),
        br#"[{"id":"abc","url":"http://x/cat.jpg"}]"#
    );

    let seen = upstream.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(seen[0].path_and_query, "/v1/images/search?limit=1");
    assert_eq!(seen[0].headers.get("x-api-key").unwrap(), "test-key");
    assert_eq!(seen[0].headers.get("content-type").unwrap(), "application/json");
    assert!(seen[0].body.is_empty());
}

#[tokio::test]
async fn test_post_serializes_payload() {
    let upstream = start_mock_upstream(Reply::ok(r#"{"message":"SUCCESS","id":1}"#)).await;
    let dispatcher = dispatcher_for(upstream.base_url());
    let payload = json!({"image_id": "x", "sub_id": "u", "value": 1});

    let outcome = submit_and_wait(&dispatcher, OutboundRequest::post("votes", payload.clone())).await;
    assert_eq!(outcome.bytes().as_ref(), br#"{"message":"SUCCESS","id":1}"#);

    let seen = upstream.seen();
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].path_and_query, "/votes");
    assert_eq!(seen[0].headers.get("x-api-key").unwrap(), "test-key");
    let body: serde_json::Value = serde_json::from_slice(&seen[0].body).unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_delete_has_no_body() {
    let upstream = start_mock_upstream(Reply::ok(r#"{"message":"SUCCESS"}"#)).await;
    let dispatcher = dispatcher_for(upstream.base_url());

    submit_and_wait(&dispatcher, OutboundRequest::delete("favourites/123")).await;

    let seen = upstream.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::DELETE);
    assert_eq!(seen[0].path_and_query, "/favourites/123");
    assert_eq!(seen[0].headers.get("content-type").unwrap(), "application/json");
    assert!(seen[0].body.is_empty());
}

#[tokio::test]
async fn test_upstream_error_status_passes_through() {
    let upstream = start_mock_upstream(Reply {
        status: StatusCode::BAD_REQUEST,
        body: "INVALID_ACCOUNT",
        delay: Duration::ZERO,
    })
    .await;
    let dispatcher = dispatcher_for(upstream.base_url());

    let outcome = submit_and_wait(&dispatcher, OutboundRequest::get("favourites")).await;

    assert_eq!(outcome.kind(), OutcomeKind::Upstream);
    assert_eq!(outcome.bytes().as_ref(), b"INVALID_ACCOUNT");
}

#[tokio::test]
async fn test_unsupported_method_makes_no_call() {
    let upstream = start_mock_upstream(Reply::ok("{}")).await;
    let dispatcher = dispatcher_for(upstream.base_url());

    for method in [Method::PUT, Method::PATCH, Method::HEAD] {
        let outcome =
            submit_and_wait(&dispatcher, OutboundRequest::new("breeds", method, None)).await;
        assert_eq!(outcome, Outcome::invalid_method());
    }

    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_refused_connection_is_transport_failure() {
    let addr = refused_addr().await;
    let dispatcher = dispatcher_for(format!("http://{}", addr));

    let outcome = submit_and_wait(&dispatcher, OutboundRequest::get("breeds")).await;

    assert_eq!(outcome.kind(), OutcomeKind::TransportFailure);
    assert_eq!(outcome.bytes().as_ref(), br#"{"error":"Failed to fetch data"}"#);
}

#[tokio::test]
async fn test_empty_base_url_is_transport_failure() {
    let dispatcher = dispatcher_for(String::new());
    let outcome = submit_and_wait(&dispatcher, OutboundRequest::get("breeds")).await;
    assert_eq!(outcome, Outcome::transport_failure());
}

#[tokio::test]
async fn test_repeated_submits_are_not_deduplicated() {
    let upstream = start_mock_upstream(Reply::ok("[]")).await;
    let dispatcher = dispatcher_for(upstream.base_url());

    submit_and_wait(&dispatcher, OutboundRequest::get("breeds")).await;
    submit_and_wait(&dispatcher, OutboundRequest::get("breeds")).await;

    assert_eq!(upstream.hits(), 2);
}

#[tokio::test]
async fn test_slow_upstream_times_out_and_late_result_is_dropped() {
    let upstream = start_mock_upstream(Reply {
        status: StatusCode::OK,
        body: "[]",
        delay: Duration::from_millis(600),
    })
    .await;
    let dispatcher = dispatcher_for(upstream.base_url());

    let deadline = Duration::from_millis(100);
    let result = await_with_deadline(dispatcher.submit(OutboundRequest::get("breeds")), deadline).await;
    assert_eq!(result, Err(TimedOut(deadline)));

    // The background call still completes against the upstream.
    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(upstream.hits(), 1);
}
