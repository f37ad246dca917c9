//! HTTP server for the coaching simulator
//!
//! Thin caller around the shared engine: each HTTP session owns one
//! [`attune_session::CoachingSession`], and handlers translate session
//! results into JSON with severity and band tags for the presentation layer.

pub mod http;
pub mod state;

pub use http::router;
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use attune_session::SessionError;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Unknown persona style: {0}")]
    UnknownStyle(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::UnknownStyle(_) => StatusCode::BAD_REQUEST,
            // Provider failures are turn-scoped; the client may retry.
            ServerError::Session(SessionError::Completion(_)) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
