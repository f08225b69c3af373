use tracing::{debug, error};

use crate::{
    management::CredentialStore,
    spotify::{FetchError, ResilientFetcher},
    types::CurrentlyPlaying,
};

/// What a user is doing on Spotify right now, as far as we can tell.
#[derive(Debug)]
pub enum PlaybackState {
    /// No usable credential is stored for the user.
    Unauthenticated,
    /// Spotify has no active player session for the user.
    Inactive,
    /// A player session exists; it may be paused.
    Active(CurrentlyPlaying),
    /// Loading the credential or talking to Spotify failed.
    Failed(FetchError),
}

/// Looks up the playback state of `user_id`.
///
/// Users without a stored access token never cause a request to Spotify.
///
/// # Arguments
///
/// * `store` - Where the user's token pair is loaded from
/// * `fetcher` - Performs the lookup and stores a refreshed token
/// * `user_id` - Spotify user id taken from the request path
///
/// # Returns
///
/// - [`PlaybackState::Unauthenticated`] - No row, or a row with an empty
///   access token
/// - [`PlaybackState::Inactive`] - Spotify answered 204
/// - [`PlaybackState::Active`] - Spotify returned a player object
/// - [`PlaybackState::Failed`] - The store or the fetch failed; the error
///   is logged before it is returned
pub async fn playback_state(
    store: &dyn CredentialStore,
    fetcher: &ResilientFetcher,
    user_id: &str,
) -> PlaybackState {
    let credential = match store.load(user_id).await {
        Ok(Some(credential)) if credential.is_authorized() => credential,
        Ok(_) => {
            debug!(user_id, "no credential stored");
            return PlaybackState::Unauthenticated;
        }
        Err(e) => {
            error!(user_id, error = %e, "failed to load credential");
            return PlaybackState::Failed(e.into());
        }
    };

    match fetcher
        .fetch_as_user::<CurrentlyPlaying>(
            user_id,
            &credential.access_token,
            &credential.refresh_token,
        )
        .await
    {
        Ok(Some(playing)) => PlaybackState::Active(playing),
        Ok(None) => PlaybackState::Inactive,
        Err(e) => {
            error!(user_id, error = %e, "failed to fetch currently playing");
            PlaybackState::Failed(e)
        }
    }
}
