use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::{
    config::SpotifyConfig,
    spotify::{AuthError, FetchError},
    types::TokenPair,
};

/// Body of a successful token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
}

/// HTTP client bound to one user's token pair.
///
/// Every request carries the held access token as bearer credential. When the
/// held access token is empty a refresh-token grant runs first, so callers
/// force a refresh with [`AuthorizedClient::invalidate`]. Once done,
/// [`AuthorizedClient::into_token`] hands back the pair that was actually used.
pub struct AuthorizedClient<'a> {
    http: &'a Client,
    config: &'a SpotifyConfig,
    token: TokenPair,
}

impl<'a> AuthorizedClient<'a> {
    pub fn new(http: &'a Client, config: &'a SpotifyConfig, token: TokenPair) -> Self {
        Self {
            http,
            config,
            token,
        }
    }

    /// Sends a bearer-authorized GET to `url`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Auth`] - The pending refresh grant failed
    /// - [`FetchError::Network`] - The request could not be sent
    ///
    /// Non-2xx answers are not errors here; the caller inspects the body.
    pub async fn get(&mut self, url: &str) -> Result<Response, FetchError> {
        if self.token.access_token.is_empty() {
            self.token = refresh_access_token(self.http, self.config, &self.token.refresh_token)
                .await?;
        }

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token.access_token)
            .send()
            .await?;

        Ok(response)
    }

    /// Drops the held access token so the next call refreshes it.
    pub fn invalidate(&mut self) {
        self.token.access_token.clear();
    }

    pub fn into_token(self) -> TokenPair {
        self.token
    }
}

/// Builds the consent page URL the user is redirected to.
///
/// # Arguments
///
/// * `config` - Client id, redirect URI, scope and the authorize endpoint
/// * `state` - Opaque value Spotify echoes back to the callback
///
/// # Errors
///
/// Returns [`AuthError::InvalidUrl`] if the configured authorize endpoint
/// is not a valid URL.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config, &generate_state())?;
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &SpotifyConfig, state: &str) -> Result<Url, AuthError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("state", state),
        ],
    )?;
    Ok(url)
}

/// Mints a new access token from a refresh token.
///
/// Posts a `refresh_token` grant to the token endpoint, authenticating with
/// the client id and secret.
///
/// # Arguments
///
/// * `http` - Shared HTTP client
/// * `config` - Client credentials and the token endpoint
/// * `refresh_token` - Refresh token stored for the user
///
/// # Returns
///
/// The new pair. Spotify may rotate the refresh token as well; when the
/// answer carries none, the one passed in is kept.
///
/// # Errors
///
/// - [`AuthError::Network`] - The token endpoint could not be reached
/// - [`AuthError::Endpoint`] - Non-2xx answer, e.g. a revoked refresh token
/// - [`AuthError::Malformed`] - The body is not a token or has no access token
///
/// # Example
///
/// ```
/// let pair = refresh_access_token(&http, &config, "AQC...refresh").await?;
/// println!("new access token: {}", pair.access_token);
/// ```
pub async fn refresh_access_token(
    http: &Client,
    config: &SpotifyConfig,
    refresh_token: &str,
) -> Result<TokenPair, AuthError> {
    let token = request_token(
        http,
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await?;

    info!(expires_in = ?token.expires_in, "refreshed spotify access token");

    let refresh_token = token
        .refresh_token
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| refresh_token.to_string());

    Ok(TokenPair::new(token.access_token, refresh_token))
}

/// Exchanges an authorization code for the initial token pair.
///
/// # Arguments
///
/// * `http` - Shared HTTP client
/// * `config` - Client credentials, redirect URI and the token endpoint
/// * `code` - The `code` query parameter received on the callback
///
/// # Errors
///
/// Same as [`refresh_access_token`], plus [`AuthError::Malformed`] when the
/// answer lacks a refresh token.
pub async fn exchange_code(
    http: &Client,
    config: &SpotifyConfig,
    code: &str,
) -> Result<TokenPair, AuthError> {
    let token = request_token(
        http,
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .await?;

    debug!(scope = ?token.scope, "exchanged authorization code");

    match token.refresh_token {
        Some(refresh_token) if !refresh_token.is_empty() => {
            Ok(TokenPair::new(token.access_token, refresh_token))
        }
        _ => Err(AuthError::Malformed("missing refresh token".to_string())),
    }
}

async fn request_token(
    http: &Client,
    config: &SpotifyConfig,
    form: &[(&str, &str)],
) -> Result<TokenResponse, AuthError> {
    let res = http
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(form)
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(AuthError::Endpoint { status, body });
    }

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| AuthError::Malformed(e.to_string()))?;
    if token.access_token.is_empty() {
        return Err(AuthError::Malformed("empty access token".to_string()));
    }

    Ok(token)
}
