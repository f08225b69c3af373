use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    api,
    config::SpotifyConfig,
    management::CredentialStore,
    spotify::ResilientFetcher,
    ui::Assets,
};

/// Shared, read-only state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub fetcher: Arc<ResilientFetcher>,
    pub assets: Arc<Assets>,
}

impl AppState {
    pub fn new(
        http: reqwest::Client,
        spotify: SpotifyConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let fetcher = ResilientFetcher::new(http, Arc::new(spotify), Arc::clone(&store));
        Self {
            store,
            fetcher: Arc::new(fetcher),
            assets: Arc::new(Assets::embedded()),
        }
    }

    pub fn spotify(&self) -> &SpotifyConfig {
        self.fetcher.config()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::landing))
        .route("/health", get(api::health))
        .route("/lyssnar.css", get(api::stylesheet))
        .route("/favicon.svg", get(api::favicon))
        .route("/authorize", get(api::authorize))
        .route("/callback", get(api::callback))
        .route(
            "/v1/user/{id}/currently-playing",
            get(api::currently_playing_api),
        )
        .route(
            "/v1/user/{id}/currently-playing/short",
            get(api::currently_playing_short_api),
        )
        .fallback(api::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(state)).await
}
