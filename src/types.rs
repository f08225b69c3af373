use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Access/refresh token pair used for a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Error object embedded in an otherwise regular Spotify response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorObject {
    #[serde(alias = "Status")]
    pub status: u16,
    #[serde(alias = "Message")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageObject {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumObject {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub images: Vec<ImageObject>,
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowObject {
    pub id: String,
    pub name: String,
    pub publisher: String,
    pub uri: String,
    pub images: Vec<ImageObject>,
    pub external_urls: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub artists: Vec<ArtistObject>,
    pub album: AlbumObject,
    pub external_urls: HashMap<String, String>,
    pub duration_ms: u64,
    pub explicit: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeObject {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub show: ShowObject,
    pub external_urls: HashMap<String, String>,
    pub duration_ms: u64,
}

/// The item in the player: either a music track or a podcast episode.
///
/// Spotify discriminates the two with the `type` field. Payloads without a
/// `type` are read as tracks.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayableItem {
    Track(TrackObject),
    Episode(EpisodeObject),
}

impl<'de> Deserialize<'de> for PlayableItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value.get("type").and_then(Value::as_str).unwrap_or("track");

        match kind {
            "episode" => serde_json::from_value(value)
                .map(PlayableItem::Episode)
                .map_err(de::Error::custom),
            _ => serde_json::from_value(value)
                .map(PlayableItem::Track)
                .map_err(de::Error::custom),
        }
    }
}

impl PlayableItem {
    pub fn id(&self) -> &str {
        match self {
            PlayableItem::Track(track) => &track.id,
            PlayableItem::Episode(episode) => &episode.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PlayableItem::Track(track) => &track.name,
            PlayableItem::Episode(episode) => &episode.name,
        }
    }

    /// The `spotify:<kind>:<id>` kind segment.
    pub fn kind(&self) -> &'static str {
        match self {
            PlayableItem::Track(_) => "track",
            PlayableItem::Episode(_) => "episode",
        }
    }

    /// Images of the owning album or show.
    pub fn images(&self) -> &[ImageObject] {
        match self {
            PlayableItem::Track(track) => &track.album.images,
            PlayableItem::Episode(episode) => &episode.show.images,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub href: String,
    pub uri: String,
    pub external_urls: HashMap<String, String>,
}

/// Response of `GET /me/player/currently-playing`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentlyPlaying {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    pub context: Option<ContextObject>,
    pub timestamp: Option<i64>,
    pub progress_ms: Option<u64>,
    pub is_playing: bool,
    pub item: Option<PlayableItem>,
    pub currently_playing_type: Option<String>,
}

/// Response of `GET /me`, limited to what is readable without extra scopes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
    pub id: String,
    pub display_name: Option<String>,
    pub uri: String,
    pub images: Vec<ImageObject>,
    pub external_urls: HashMap<String, String>,
}
