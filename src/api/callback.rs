use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info, warn};

use crate::{
    server::AppState,
    spotify::auth::{authorize_url, exchange_code},
    types::UserObject,
    utils,
};

const SAD_FACE: &str = ":-(";
const GENERIC_ERROR: &str = "An error occured, try again later.";

/// Sends the user to Spotify's consent page.
pub async fn authorize(State(state): State<AppState>) -> Response {
    match authorize_url(state.spotify(), &utils::generate_state()) {
        Ok(url) => Redirect::temporary(url.as_str()).into_response(),
        Err(e) => {
            error!(error = %e, "failed to build authorization url");
            failure(&state)
        }
    }
}

/// Completes the authorization-code flow and stores the user's token pair.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(reason) = params.get("error") {
        warn!(reason = %reason, "authorization was not granted");
        return failure(&state);
    }

    let Some(code) = params.get("code") else {
        warn!("callback without authorization code");
        return failure(&state);
    };

    let token = match exchange_code(state.fetcher.http(), state.spotify(), code).await {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "token exchange failed");
            return failure(&state);
        }
    };

    // The profile tells us whom the tokens belong to.
    let fetched = match state.fetcher.fetch::<UserObject>(token).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!(error = %e, "failed to fetch user profile");
            return failure(&state);
        }
    };

    let Some(user) = fetched.response.filter(|u| !u.id.is_empty()) else {
        warn!("user profile without id");
        return failure(&state);
    };

    if let Err(e) = state
        .store
        .upsert(
            &user.id,
            &fetched.token.access_token,
            &fetched.token.refresh_token,
        )
        .await
    {
        error!(user_id = %user.id, error = %e, "failed to store credential");
        return failure(&state);
    }

    info!(user_id = %user.id, "user authorized");
    state.assets.authorized(&user.id).into_response()
}

fn failure(state: &AppState) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        state.assets.error_page(SAD_FACE, GENERIC_ERROR),
    )
        .into_response()
}
