use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiStatus;

pub mod contact;
pub mod health;
pub mod site;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err}");
    status(
        StatusCode::INTERNAL_SERVER_ERROR,
        false,
        "Interner Serverfehler",
    )
}

/// Builds a `{success, message}` JSON response with an explicit utf-8
/// charset, matching what the browser client expects.
fn status(code: StatusCode, success: bool, message: impl Into<String>) -> Response {
    (
        code,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        Json(ApiStatus {
            success,
            message: message.into(),
        }),
    )
        .into_response()
}
