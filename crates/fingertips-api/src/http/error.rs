//! Application error type mapping to HTTP status codes.
//!
//! Error bodies have the shape `{"detail": "..."}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use fingertips_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Failure raised while running a turn.
    Chat(ChatError),
    /// The request body could not be decoded.
    Rejected(JsonRejection),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Rejected(e)
    }
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            AppError::Chat(ChatError::Configuration(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GROQ API key is missing.".to_string(),
            ),
            AppError::Chat(ChatError::Upstream { message, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error generating response: {message}"),
            ),
            AppError::Chat(ChatError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Rejected(rejection) => {
                (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            tracing::error!(%status, %detail, "Request failed");
        }

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}
