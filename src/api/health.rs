use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

/// Liveness check for monitoring.
///
/// Reports the service version and which credential backend is in use, so a
/// deployment that silently fell back to the memory store is easy to spot.
/// Neither the database nor Spotify is contacted.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.store.backend()
    }))
}
