//! Images and breeds.

use axum::{
    extract::{RawQuery, State},
    response::Response,
};

use crate::dispatch::request::encode_component;
use crate::dispatch::OutboundRequest;
use crate::http::handlers::{dispatch_and_wait, reject};
use crate::http::server::AppState;

/// Images returned per breed when the caller gives no limit.
pub const DEFAULT_BREED_IMAGE_LIMIT: i64 = 8;

/// `GET /api/cats/random`
pub async fn get_random_cat(State(state): State<AppState>) -> Response {
    dispatch_and_wait(
        &state,
        "random_cat",
        OutboundRequest::get("images/search?limit=1"),
    )
    .await
}

/// `GET /api/breeds`
pub async fn get_breeds(State(state): State<AppState>) -> Response {
    dispatch_and_wait(&state, "breeds", OutboundRequest::get("breeds")).await
}

/// `GET /api/breed-images?breed_id=..&limit=..`
pub async fn get_breed_images(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    tracing::info!("GetBreedImages endpoint hit");

    let mut breed_id = String::new();
    let mut limit_raw = None;
    if let Some(query) = query.as_deref() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "breed_id" => breed_id = value.into_owned(),
                "limit" => limit_raw = Some(value.into_owned()),
                _ => {}
            }
        }
    }

    let limit = match parse_limit(limit_raw.as_deref()) {
        Some(limit) => limit,
        None => return reject("breed_images", "Invalid limit parameter"),
    };

    let endpoint = format!(
        "images/search?breed_ids={}&limit={}",
        encode_component(&breed_id),
        limit
    );
    dispatch_and_wait(&state, "breed_images", OutboundRequest::get(endpoint)).await
}

/// Absent or empty → default; otherwise it must be an integer.
fn parse_limit(raw: Option<&str>) -> Option<i64> {
    match raw {
        None | Some("") => Some(DEFAULT_BREED_IMAGE_LIMIT),
        Some(raw) => raw.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), Some(8));
        assert_eq!(parse_limit(Some("")), Some(8));
        assert_eq!(parse_limit(Some("3")), Some(3));
        assert_eq!(parse_limit(Some("invalid")), None);
        assert_eq!(parse_limit(Some("2.5")), None);
    }
}
