//! # Spotify Integration Module
//!
//! Client side of the Spotify Web API as far as Lyssnar needs it: the OAuth
//! 2.0 authorization-code flow, a bearer-authorized client bound to one
//! user's token pair, and the lookup logic that survives an expired access
//! token.
//!
//! ## Token lifecycle
//!
//! Spotify does not reject an expired token at the HTTP level in a way we
//! rely on; instead the JSON body carries an embedded error object with
//! status 401. [`ResilientFetcher`] treats that as "refresh and try again",
//! exactly once:
//!
//! ```text
//! First attempt ──401──▶ invalidate token ──▶ Retried attempt ──401──▶ Remote error
//!      │                                            │
//!      ├─204─▶ Ok(None)                             ├─204─▶ Ok(None)
//!      └─200─▶ Ok(Some(body))                       └─200─▶ Ok(Some(body))
//! ```
//!
//! When the token actually used differs from the stored one, the new access
//! token is written back to the credential store. That write never fails the
//! lookup.
//!
//! ## API Coverage
//!
//! - `GET /me` - profile of the authorizing user ([`crate::types::UserObject`])
//! - `GET /me/player/currently-playing` - player state
//!   ([`crate::types::CurrentlyPlaying`])
//! - `POST /api/token` - code exchange and refresh-token grants

pub mod auth;
mod error;
mod fetcher;
mod playback;

pub use error::{AuthError, FetchError};
pub use fetcher::{Fetched, Resource, ResilientFetcher};
pub use playback::{PlaybackState, playback_state};
