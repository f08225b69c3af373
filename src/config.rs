//! Configuration management for Lyssnar.
//!
//! Every setting is a command-line flag with an environment variable fallback,
//! so the service can be configured the usual twelve-factor way. A `.env` file
//! in the working directory is loaded first, if present:
//! 1. Command-line flags (highest priority)
//! 2. Environment variables
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{net::IpAddr, time::Duration};

use clap::Args;

/// Default Spotify Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Default Spotify consent page.
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Default Spotify token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Scope needed to read the currently playing item.
pub const DEFAULT_SCOPE: &str = "user-read-currently-playing";

/// Loads environment variables from a `.env` file in the working directory.
///
/// A missing file is not an error; real deployments usually provide the
/// variables through the process environment instead.
pub fn load_env() {
    let _ = dotenv::dotenv();
}

/// Spotify application credentials and endpoints.
///
/// The endpoints default to the public Spotify hosts and are only overridden
/// when pointing the service at a different deployment (or a fake in tests).
#[derive(Args, Debug, Clone)]
pub struct SpotifyConfig {
    /// Client ID of the registered Spotify application
    #[arg(long, env = "SPOTIFY_CLIENT_ID")]
    pub client_id: String,

    /// Client secret of the registered Spotify application
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Redirect URI registered with Spotify, e.g. https://lyssnar.com/callback
    #[arg(long = "callback", env = "SPOTIFY_CALLBACK")]
    pub redirect_uri: String,

    /// Base URL of the Spotify Web API
    #[arg(long, env = "SPOTIFY_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// URL of the Spotify consent page
    #[arg(long, env = "SPOTIFY_API_AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    pub auth_url: String,

    /// URL of the Spotify token endpoint
    #[arg(long, env = "SPOTIFY_API_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,

    /// Space separated scopes requested during authorization
    #[arg(long, env = "SPOTIFY_API_AUTH_SCOPE", default_value = DEFAULT_SCOPE)]
    pub scope: String,
}

/// Database connection settings shared by all subcommands.
#[derive(Args, Debug, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Settings for the `serve` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Port the HTTP server listens on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address the HTTP server binds to
    #[arg(long = "bind", env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: IpAddr,

    /// Postgres connection string; credentials are kept in memory when unset
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Timeout in seconds for outgoing Spotify requests; none when unset
    #[arg(long, env = "HTTP_TIMEOUT_SECS")]
    pub http_timeout_secs: Option<u64>,

    #[command(flatten)]
    pub spotify: SpotifyConfig,
}

impl ServeConfig {
    /// Returns the optional timeout for outgoing requests.
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}
