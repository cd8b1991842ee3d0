use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Shown for every failed page load, whatever the cause.
pub const PAGE_NOT_FOUND_MESSAGE: &str =
    "We could not find this agent's page. Check that the address is correct.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Page not found")]
    PageNotFound,

    #[error("Not implemented")]
    NotImplemented,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::PageNotFound => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": {
                        "code": "PAGE_NOT_FOUND",
                        "message": PAGE_NOT_FOUND_MESSAGE,
                        "home": "/"
                    }
                }),
            ),
            AppError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                json!({
                    "error": {
                        "code": "NOT_IMPLEMENTED",
                        "message": "This path is served by the admin application"
                    }
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
