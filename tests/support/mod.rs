#![allow(dead_code)]

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use lyssnar::{
    config::{DEFAULT_SCOPE, SpotifyConfig},
    management::{Credential, CredentialStore, MemoryCredentialStore, StoreError},
    server::AppState,
    spotify::ResilientFetcher,
};
use serde_json::Value;
use tokio::net::TcpListener;

/// A canned HTTP answer of the fake Spotify.
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    body: String,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: String::new(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

#[derive(Default)]
struct FakeState {
    me: Mutex<VecDeque<Reply>>,
    currently_playing: Mutex<VecDeque<Reply>>,
    token: Mutex<VecDeque<Reply>>,
    bearers: Mutex<Vec<String>>,
    token_forms: Mutex<Vec<String>>,
    api_calls: AtomicUsize,
    token_calls: AtomicUsize,
}

/// Scriptable stand-in for the Spotify Web API and its token endpoint.
///
/// Each endpoint pops the next queued reply; an empty queue answers 500.
pub struct FakeSpotify {
    pub addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeSpotify {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/v1/me", get(api))
            .route("/v1/me/player/currently-playing", get(api))
            .route("/api/token", post(token))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn config(&self) -> SpotifyConfig {
        SpotifyConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8080/callback".to_string(),
            api_url: format!("http://{}/v1", self.addr),
            auth_url: format!("http://{}/authorize", self.addr),
            token_url: format!("http://{}/api/token", self.addr),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    pub fn fetcher(&self, store: Arc<dyn CredentialStore>) -> ResilientFetcher {
        ResilientFetcher::new(reqwest::Client::new(), Arc::new(self.config()), store)
    }

    pub fn app_state(&self, store: Arc<dyn CredentialStore>) -> AppState {
        AppState::new(reqwest::Client::new(), self.config(), store)
    }

    pub fn push_me(&self, reply: Reply) {
        self.state.me.lock().unwrap().push_back(reply);
    }

    pub fn push_currently_playing(&self, reply: Reply) {
        self.state.currently_playing.lock().unwrap().push_back(reply);
    }

    pub fn push_token(&self, reply: Reply) {
        self.state.token.lock().unwrap().push_back(reply);
    }

    pub fn api_calls(&self) -> usize {
        self.state.api_calls.load(Ordering::SeqCst)
    }

    pub fn token_calls(&self) -> usize {
        self.state.token_calls.load(Ordering::SeqCst)
    }

    /// Bearer tokens seen by the API, in request order.
    pub fn bearers(&self) -> Vec<String> {
        self.state.bearers.lock().unwrap().clone()
    }

    /// Raw form bodies posted to the token endpoint.
    pub fn token_forms(&self) -> Vec<String> {
        self.state.token_forms.lock().unwrap().clone()
    }
}

async fn api(State(state): State<Arc<FakeState>>, headers: HeaderMap, uri: Uri) -> Response {
    state.api_calls.fetch_add(1, Ordering::SeqCst);

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string();
    state.bearers.lock().unwrap().push(bearer);

    let queue = if uri.path().ends_with("/currently-playing") {
        &state.currently_playing
    } else {
        &state.me
    };

    let reply = queue.lock().unwrap().pop_front();
    match reply {
        Some(reply) => reply.into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn token(State(state): State<Arc<FakeState>>, body: String) -> Response {
    state.token_calls.fetch_add(1, Ordering::SeqCst);
    state.token_forms.lock().unwrap().push(body);

    let reply = state.token.lock().unwrap().pop_front();
    match reply {
        Some(reply) => reply.into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Memory store that records token replacements and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryCredentialStore,
    replaced: Mutex<Vec<(String, String)>>,
    fail_replace: bool,
    fail_load: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_replace() -> Self {
        Self {
            fail_replace: true,
            ..Self::default()
        }
    }

    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub async fn with_user(self, id: &str, access_token: &str, refresh_token: &str) -> Self {
        self.inner
            .upsert(id, access_token, refresh_token)
            .await
            .unwrap();
        self
    }

    pub fn replaced(&self) -> Vec<(String, String)> {
        self.replaced.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for RecordingStore {
    fn backend(&self) -> &'static str {
        "recording"
    }

    async fn load(&self, user_id: &str) -> Result<Option<Credential>, StoreError> {
        if self.fail_load {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.load(user_id).await
    }

    async fn replace_access_token(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<(), StoreError> {
        self.replaced
            .lock()
            .unwrap()
            .push((user_id.to_string(), access_token.to_string()));

        if self.fail_replace {
            return Err(StoreError::NotFound(user_id.to_string()));
        }
        self.inner.replace_access_token(user_id, access_token).await
    }

    async fn upsert(
        &self,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), StoreError> {
        self.inner
            .upsert(user_id, access_token, refresh_token)
            .await
    }

    async fn remove(&self, user_id: &str) -> Result<(), StoreError> {
        self.inner.remove(user_id).await
    }
}
