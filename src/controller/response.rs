// JSON bodies shared by the activity controllers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::db::DirectoryError;

/// Confirmation body of a successful roster change.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every rejected request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Renders a JSON response with the given status.
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [("content-type", "application/json")],
        serde_json::to_string(body).unwrap_or_default(),
    )
        .into_response()
}

/// Renders `{"message": ...}` with 200.
pub fn message(text: String) -> Response {
    json(StatusCode::OK, &MessageResponse { message: text })
}

/// Renders `{"detail": ...}` with the given status.
pub fn detail(status: StatusCode, text: impl Into<String>) -> Response {
    json(
        status,
        &ErrorResponse {
            detail: text.into(),
        },
    )
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        detail(self.status(), self.to_string())
    }
}
