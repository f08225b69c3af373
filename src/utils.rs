use std::sync::LazyLock;

use rand::{Rng, distr::Alphanumeric};
use regex::Regex;

use crate::types::{ArtistObject, ImageObject, PlayableItem};

static USER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid user id pattern"));

/// Random value for the OAuth `state` parameter.
///
/// # Returns
///
/// A 32 character string of ASCII letters and digits.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Whether `id` looks like a Spotify user id we are willing to look up.
///
/// Letters, digits, `.`, `_` and `-` are accepted. Anything else, including
/// the empty string, is rejected before the store is queried.
///
/// # Example
///
/// ```
/// assert!(is_valid_user_id("john.doe_42"));
/// assert!(!is_valid_user_id("a/b"));
/// ```
pub fn is_valid_user_id(id: &str) -> bool {
    USER_ID.is_match(id)
}

/// Comma separated artist names, in the order Spotify lists them.
pub fn join_artists(artists: &[ArtistObject]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Picks the cover to display: the last image whose height is strictly
/// between 200 and 500 pixels.
pub fn select_image(images: &[ImageObject]) -> Option<&ImageObject> {
    images
        .iter()
        .rev()
        .find(|i| matches!(i.height, Some(h) if h > 200 && h < 500))
}

/// One line summary used by the short API.
///
/// # Format
///
/// `<artists> - <name> @ <url> / spotify:<kind>:<id>`
///
/// For an episode the show name takes the place of the artists and the URL is
/// the episode's own Spotify link.
///
/// # Example
///
/// ```
/// assert_eq!(
///     short_message(&item),
///     "Artist - Song @ https://open.spotify.com/track/abc / spotify:track:abc"
/// );
/// ```
pub fn short_message(item: &PlayableItem) -> String {
    let (artists, url) = match item {
        PlayableItem::Track(track) => (join_artists(&track.artists), &track.external_urls),
        PlayableItem::Episode(episode) => (episode.show.name.clone(), &episode.external_urls),
    };

    format!(
        "{artists} - {name} @ {url} / spotify:{kind}:{id}",
        name = item.name(),
        url = url.get("spotify").map(String::as_str).unwrap_or_default(),
        kind = item.kind(),
        id = item.id(),
    )
}

/// Escapes text for inclusion in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
