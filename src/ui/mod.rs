//! Embedded templates, static assets and the HTML views built from them.
//!
//! Everything is compiled into the binary and gathered in one immutable
//! [`Assets`] value that the router shares with its handlers.

use axum::response::Html;

use crate::{
    types::PlayableItem,
    utils::{escape_html, join_artists, select_image},
};

/// Templates and static files served by the site.
#[derive(Debug, Clone)]
pub struct Assets {
    pub css: &'static str,
    pub favicon: &'static str,
    layout: &'static str,
    landing: &'static str,
    authorized: &'static str,
    currently_playing: &'static str,
    error: &'static str,
}

impl Assets {
    pub fn embedded() -> Self {
        Self {
            css: include_str!("lyssnar.css"),
            favicon: include_str!("favicon.svg"),
            layout: include_str!("templates/layout.html"),
            landing: include_str!("templates/landing.html"),
            authorized: include_str!("templates/authorized.html"),
            currently_playing: include_str!("templates/currently-playing.html"),
            error: include_str!("templates/error.html"),
        }
    }

    pub fn landing(&self) -> Html<String> {
        self.page("Now playing on Spotify", self.landing.to_string())
    }

    pub fn authorized(&self, id: &str) -> Html<String> {
        self.page("Connected", render(self.authorized, &[("id", id)]))
    }

    pub fn error_page(&self, header: &str, message: &str) -> Html<String> {
        self.page(
            header,
            render(self.error, &[("header", header), ("message", message)]),
        )
    }

    pub fn currently_playing(&self, id: &str, now: &NowPlaying) -> Html<String> {
        let body = render(
            self.currently_playing,
            &[
                ("id", id),
                ("artist", now.artist.as_str()),
                ("track", now.track.as_str()),
                ("url", now.url.as_str()),
                ("image", now.image.as_str()),
            ],
        );
        self.page(&format!("{} - {}", now.artist, now.track), body)
    }

    fn page(&self, title: &str, body: String) -> Html<String> {
        let title = escape_html(title);
        Html(substitute(self.layout, |key| match key {
            "title" => Some(title.clone()),
            "body" => Some(body.clone()),
            _ => None,
        }))
    }
}

/// Display fields of the item in the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NowPlaying {
    pub artist: String,
    pub track: String,
    pub url: String,
    pub image: String,
}

impl NowPlaying {
    /// Episodes show the podcast name in place of the artists and link to the
    /// show.
    pub fn from_item(item: &PlayableItem) -> Self {
        let (artist, urls) = match item {
            PlayableItem::Track(track) => (join_artists(&track.artists), &track.external_urls),
            PlayableItem::Episode(episode) => {
                (episode.show.name.clone(), &episode.show.external_urls)
            }
        };

        Self {
            artist,
            track: item.name().to_string(),
            url: urls.get("spotify").cloned().unwrap_or_default(),
            image: select_image(item.images())
                .map(|i| i.url.clone())
                .unwrap_or_default(),
        }
    }
}

/// Fills `{{key}}` placeholders with HTML-escaped values. Unknown keys are
/// left as they are.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    substitute(template, |key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| escape_html(v))
    })
}

fn substitute(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };

        let key = after[..end].trim();
        match lookup(key) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}
