use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    api::ApiError,
    server::AppState,
    spotify::{PlaybackState, playback_state},
    utils,
};

/// Full currently playing object of a user, as Spotify returned it.
pub async fn currently_playing_api(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    if !utils::is_valid_user_id(&id) {
        return ApiError::not_found().into_response();
    }

    match playback_state(state.store.as_ref(), &state.fetcher, &id).await {
        PlaybackState::Unauthenticated => ApiError::not_found().into_response(),
        PlaybackState::Failed(_) => ApiError::internal().into_response(),
        PlaybackState::Inactive => ApiError::not_playing().into_response(),
        PlaybackState::Active(playing) => Json(playing).into_response(),
    }
}

/// One line summary, `{"playing": "<artists> - <name> @ <url> / spotify:track:<id>"}`.
///
/// A paused player counts as not playing here.
pub async fn currently_playing_short_api(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    if !utils::is_valid_user_id(&id) {
        return ApiError::not_found().into_response();
    }

    let playing = match playback_state(state.store.as_ref(), &state.fetcher, &id).await {
        PlaybackState::Unauthenticated => return ApiError::not_found().into_response(),
        PlaybackState::Failed(_) => return ApiError::internal().into_response(),
        PlaybackState::Inactive => return ApiError::not_playing().into_response(),
        PlaybackState::Active(playing) => playing,
    };

    match playing.item {
        Some(item) if playing.is_playing => {
            Json(json!({ "playing": utils::short_message(&item) })).into_response()
        }
        _ => ApiError::not_playing().into_response(),
    }
}
