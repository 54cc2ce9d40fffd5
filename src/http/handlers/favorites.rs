//! Favourites list management.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    response::Response,
};

use crate::dispatch::request::encode_component;
use crate::dispatch::OutboundRequest;
use crate::http::handlers::{dispatch_and_wait, parse_body, reject};
use crate::http::server::AppState;
use crate::models::{default_sub_id, FavoritePayload};

/// `GET /api/favorites` (latest 28 for the configured subscriber)
pub async fn get_favorites(State(state): State<AppState>) -> Response {
    let endpoint = format!(
        "favourites?limit=28&order=Desc&sub_id={}",
        encode_component(&state.config.sub_id())
    );
    dispatch_and_wait(&state, "list_favorites", OutboundRequest::get(endpoint)).await
}

/// `POST /api/favorites`
pub async fn add_favorite(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let mut favorite: FavoritePayload = match parse_body("add_favorite", body) {
        Ok(favorite) => favorite,
        Err(response) => return response,
    };

    if favorite.image_id.is_empty() {
        return reject("add_favorite", "Image ID is required");
    }

    default_sub_id(&mut favorite.sub_id, || state.config.sub_id());

    let payload = match serde_json::to_value(&favorite) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize favourite");
            return reject("add_favorite", "Invalid request body");
        }
    };

    dispatch_and_wait(
        &state,
        "add_favorite",
        OutboundRequest::post("favourites", payload),
    )
    .await
}

/// `DELETE /api/favorites/{id}`
pub async fn remove_favorite(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let endpoint = format!("favourites/{}", encode_component(&id));
    dispatch_and_wait(&state, "remove_favorite", OutboundRequest::delete(endpoint)).await
}
