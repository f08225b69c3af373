use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    config::SpotifyConfig,
    management::CredentialStore,
    spotify::{FetchError, auth::AuthorizedClient},
    types::{CurrentlyPlaying, ErrorObject, TokenPair, UserObject},
};

/// A user-scoped Spotify resource that embeds error objects in its body.
pub trait Resource: DeserializeOwned + Send {
    /// Path below the API base URL.
    const PATH: &'static str;

    /// The error object Spotify embedded in the body, if any.
    fn error(&self) -> Option<&ErrorObject>;
}

impl Resource for UserObject {
    const PATH: &'static str = "/me";

    fn error(&self) -> Option<&ErrorObject> {
        self.error.as_ref()
    }
}

impl Resource for CurrentlyPlaying {
    const PATH: &'static str = "/me/player/currently-playing";

    fn error(&self) -> Option<&ErrorObject> {
        self.error.as_ref()
    }
}

/// Outcome of [`ResilientFetcher::fetch`].
#[derive(Debug)]
pub struct Fetched<R> {
    /// `None` when Spotify answered 204 No Content.
    pub response: Option<R>,
    /// The pair the successful attempt used.
    pub token: TokenPair,
    /// Whether the access token differs from the one passed in.
    pub rotated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retried,
}

/// Performs user-scoped lookups, refreshing an expired access token once.
///
/// The fetcher owns the HTTP client, the Spotify configuration and a handle
/// to the credential store. It is shared by all handlers behind an `Arc`.
pub struct ResilientFetcher {
    http: Client,
    config: Arc<SpotifyConfig>,
    store: Arc<dyn CredentialStore>,
}

impl ResilientFetcher {
    pub fn new(http: Client, config: Arc<SpotifyConfig>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            config,
            store,
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Fetches `R` on behalf of `user_id`.
    ///
    /// If Spotify rejected the stored access token and a refreshed one was
    /// used instead, the new token is written back to the store. That write
    /// is best effort: a failure is logged and the fetched value still
    /// returned. Two concurrent lookups for the same user may both refresh;
    /// the last write wins.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner of the token pair, used for the write-back
    /// * `access_token` - Stored access token, may be expired
    /// * `refresh_token` - Stored refresh token
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` - Spotify answered with a body
    /// - `Ok(None)` - Spotify answered 204 No Content
    ///
    /// # Errors
    ///
    /// See [`ResilientFetcher::fetch`]. Store failures never surface here.
    ///
    /// # Example
    ///
    /// ```
    /// let playing = fetcher
    ///     .fetch_as_user::<CurrentlyPlaying>("u1", &row.access_token, &row.refresh_token)
    ///     .await?;
    /// ```
    pub async fn fetch_as_user<R: Resource>(
        &self,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Option<R>, FetchError> {
        let fetched = self
            .fetch::<R>(TokenPair::new(access_token, refresh_token))
            .await?;

        if fetched.rotated {
            match self
                .store
                .replace_access_token(user_id, &fetched.token.access_token)
                .await
            {
                Ok(()) => info!(user_id, "stored refreshed access token"),
                Err(e) => warn!(user_id, error = %e, "failed to store refreshed access token"),
            }
        }

        Ok(fetched.response)
    }

    /// Fetches `R` with `token` without touching the store.
    ///
    /// An embedded 401 on the first attempt invalidates the access token, so
    /// the second attempt runs a refresh grant first. There is never a third
    /// attempt.
    ///
    /// # Returns
    ///
    /// A [`Fetched`] carrying the decoded value (or `None` on 204), the pair
    /// the last attempt used, and whether that pair differs from `token`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] - The request or body read failed
    /// - [`FetchError::Auth`] - The refresh grant failed
    /// - [`FetchError::Decode`] - The body is not a valid `R`
    /// - [`FetchError::Remote`] - Spotify embedded an error other than a
    ///   first 401, or a 401 again after the refresh
    pub async fn fetch<R: Resource>(&self, token: TokenPair) -> Result<Fetched<R>, FetchError> {
        let url = format!("{}{}", self.config.api_url.trim_end_matches('/'), R::PATH);
        let original = token.access_token.clone();
        let mut client = AuthorizedClient::new(&self.http, &self.config, token);
        let mut attempt = Attempt::First;

        let response = loop {
            debug!(url = %url, ?attempt, "requesting spotify resource");
            let res = client.get(&url).await.inspect_err(|e| {
                warn!(url = %url, error = %e, "spotify request failed");
            })?;

            if res.status() == StatusCode::NO_CONTENT {
                break None;
            }

            let body = res.bytes().await?;
            let decoded: R = serde_json::from_slice(&body).inspect_err(|e| {
                warn!(
                    url = %url,
                    error = %e,
                    body = %String::from_utf8_lossy(&body),
                    "failed to decode spotify response"
                );
            })?;

            match decoded.error() {
                Some(err) if err.status == 401 && attempt == Attempt::First => {
                    debug!(url = %url, message = %err.message, "access token rejected, refreshing");
                    attempt = Attempt::Retried;
                    client.invalidate();
                }
                Some(err) => {
                    return Err(FetchError::Remote {
                        status: err.status,
                        message: err.message.clone(),
                    });
                }
                None => break Some(decoded),
            }
        };

        let token = client.into_token();
        let rotated = token.access_token != original;
        Ok(Fetched {
            response,
            token,
            rotated,
        })
    }
}
