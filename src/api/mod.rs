//! # API Module
//!
//! HTTP handlers of the Lyssnar web service, built on
//! [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`authorize`] - Redirects to Spotify's consent page.
//! - [`callback`] - Exchanges the authorization code, looks up the user's
//!   profile id and stores the token pair under it.
//!
//! ### Currently playing
//!
//! - [`currently_playing_api`] - `GET /v1/user/{id}/currently-playing`, the
//!   full player object as JSON.
//! - [`currently_playing_short_api`] - `GET /v1/user/{id}/currently-playing/short`,
//!   a one line summary.
//! - [`fallback`] - `GET /~{id}`, the HTML page; every other unknown path
//!   gets the 404 page.
//!
//! ### Site
//!
//! - [`landing`], [`stylesheet`], [`favicon`] - static pages and assets.
//! - [`health`] - status and version for monitoring.
//!
//! ## Errors
//!
//! JSON endpoints answer with the [`ApiError`] envelope. Failures talking to
//! Spotify are reported as a generic 500; the details only go to the log.

mod callback;
mod currently_playing;
mod error;
mod health;
mod pages;

pub use callback::{authorize, callback};
pub use currently_playing::{currently_playing_api, currently_playing_short_api};
pub use error::ApiError;
pub use health::health;
pub use pages::{fallback, favicon, landing, stylesheet};
