use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use routeguard_auth::Denial;

/// `401 Unauthorized` with `{"message": ...}`.
pub fn unauthorized(message: impl Into<String>) -> Response {
    json_message(StatusCode::UNAUTHORIZED, message)
}

pub fn json_message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "message": message.into(),
        })),
    )
        .into_response()
}

/// A denial rendered as an HTTP response.
#[derive(Debug, Clone, Copy)]
pub struct DenialResponse(pub Denial);

impl IntoResponse for DenialResponse {
    fn into_response(self) -> Response {
        unauthorized(self.0.message())
    }
}
