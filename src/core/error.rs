use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::modules::backend::BackendError;
use crate::modules::sessions::clear_token_cookie;
use crate::modules::views::{self, TemplateError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Backend error: {0}")]
    Backend(BackendError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err.status() {
            Some(401) => AppError::Unauthorized(err.user_message("Session expired")),
            Some(403) => AppError::Forbidden(err.user_message("Access denied")),
            _ => AppError::Backend(err),
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = views::render(
        "error.html",
        serde_json::json!({ "status": status.as_u16(), "message": message }),
    )
    .unwrap_or_else(|_| message.to_string());

    (status, Html(body)).into_response()
}

/// Leave the panel: drop the stored token and go back to the public page
fn sign_out_redirect() -> Response {
    (
        [(header::SET_COOKIE, clear_token_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized(ref msg) => {
                tracing::info!("Unauthorized panel access: {}", msg);
                sign_out_redirect()
            }
            AppError::Forbidden(ref msg) => {
                tracing::info!("Forbidden panel access: {}", msg);
                sign_out_redirect()
            }
            AppError::Backend(ref e) => {
                tracing::error!("Backend error: {}", e);
                error_page(
                    StatusCode::BAD_GATEWAY,
                    "The reporting service is unavailable. Please try again shortly.",
                )
            }
            AppError::NotFound(ref msg) => error_page(StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(ref msg) => error_page(StatusCode::BAD_REQUEST, msg),
            AppError::Template(ref e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
