use reqwest::StatusCode;
use thiserror::Error;

use crate::management::StoreError;

/// Failures of the OAuth token endpoint or the consent URL.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token endpoint unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("token endpoint answered {status}: {body}")]
    Endpoint { status: StatusCode, body: String },

    #[error("malformed token response: {0}")]
    Malformed(String),

    #[error("invalid authorization url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failures of a single logical lookup against the Spotify Web API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure talking to the API.
    #[error("request to spotify failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The access token could not be refreshed.
    #[error("token refresh failed: {0}")]
    Auth(#[from] AuthError),

    /// The body was not the JSON shape we expected.
    #[error("could not decode spotify response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Spotify reported an error inside the response body.
    #[error("spotify returned error {status}: {message}")]
    Remote { status: u16, message: String },

    /// The stored credential could not be read.
    #[error("credential store failed: {0}")]
    Store(#[from] StoreError),
}
