use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON error envelope returned by the API, `{"error":{"Status":..,"Message":..}}`.
///
/// It mirrors the shape of Spotify's own error objects so clients can handle
/// both the same way.
#[derive(Debug, Serialize)]
pub struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    #[serde(rename = "Status")]
    status: u16,
    #[serde(rename = "Message")]
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorBody {
                status: status.as_u16(),
                message: message.into(),
            },
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not found")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    pub fn not_playing() -> Self {
        Self::new(StatusCode::OK, "user is not playing anything")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.error.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
