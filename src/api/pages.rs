use std::sync::LazyLock;

use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use regex::Regex;

use crate::{
    server::AppState,
    spotify::{PlaybackState, playback_state},
    ui::NowPlaying,
};

/// `/~<user id>`; the router's path syntax cannot express the `~` prefix.
static PROFILE_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/~([A-Za-z0-9._-]+)$").expect("valid profile page pattern"));

const SAD_FACE: &str = ":-(";
const GENERIC_ERROR: &str = "An error occured, try again later.";

pub async fn landing(State(state): State<AppState>) -> Response {
    state.assets.landing().into_response()
}

pub async fn stylesheet(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        state.assets.css,
    )
        .into_response()
}

pub async fn favicon(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        state.assets.favicon,
    )
        .into_response()
}

/// Serves `/~<user id>` and the 404 page for everything else.
pub async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    match PROFILE_PAGE.captures(uri.path()).and_then(|c| c.get(1)) {
        Some(id) => currently_playing_page(&state, id.as_str()).await,
        None => (
            StatusCode::NOT_FOUND,
            state
                .assets
                .error_page(SAD_FACE, "The requested page doesn't exist."),
        )
            .into_response(),
    }
}

async fn currently_playing_page(state: &AppState, id: &str) -> Response {
    let assets = &state.assets;

    match playback_state(state.store.as_ref(), &state.fetcher, id).await {
        PlaybackState::Unauthenticated => (
            StatusCode::NOT_FOUND,
            assets.error_page(SAD_FACE, "The account is not authorized on lyssnar.com yet"),
        )
            .into_response(),
        PlaybackState::Failed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            assets.error_page(SAD_FACE, GENERIC_ERROR),
        )
            .into_response(),
        PlaybackState::Inactive => not_active(state, id),
        PlaybackState::Active(playing) => match playing.item {
            Some(item) => assets
                .currently_playing(id, &NowPlaying::from_item(&item))
                .into_response(),
            None => not_active(state, id),
        },
    }
}

fn not_active(state: &AppState, id: &str) -> Response {
    state
        .assets
        .error_page(
            "Not active",
            &format!("{id} is not using Spotify right now."),
        )
        .into_response()
}
