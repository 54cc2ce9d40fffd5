//! Voting and vote history.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Response,
};

use crate::dispatch::request::encode_component;
use crate::dispatch::OutboundRequest;
use crate::http::handlers::{dispatch_and_wait, parse_body, reject};
use crate::http::server::AppState;
use crate::models::{default_sub_id, VotePayload};

/// `POST /api/vote`
pub async fn vote(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    tracing::info!("Vote endpoint hit");

    let mut vote: VotePayload = match parse_body("vote", body) {
        Ok(vote) => vote,
        Err(response) => return response,
    };

    if !vote.is_valid() {
        tracing::warn!(image_id = %vote.image_id, value = vote.value, "Invalid vote params");
        return reject("vote", "Invalid request parameters");
    }

    default_sub_id(&mut vote.sub_id, || state.config.sub_id());
    tracing::info!(image_id = %vote.image_id, sub_id = %vote.sub_id, value = vote.value, "Submitting vote");

    let payload = match serde_json::to_value(&vote) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize vote");
            return reject("vote", "Invalid request body");
        }
    };

    dispatch_and_wait(&state, "vote", OutboundRequest::post("votes", payload)).await
}

/// `GET /api/vote_history`
pub async fn get_vote_history(State(state): State<AppState>) -> Response {
    tracing::info!("GetVoteHistory endpoint hit");

    let endpoint = format!(
        "votes?sub_id={}&limit=28&order=Desc",
        encode_component(&state.config.sub_id())
    );
    dispatch_and_wait(&state, "vote_history", OutboundRequest::get(endpoint)).await
}
