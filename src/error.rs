use std::fmt::Debug;
use std::fmt::Display;

use axum::response::Html;
use axum::{http::StatusCode, response::IntoResponse};

pub enum AppError {
    /// No current identity where one is required.
    Unauthorized,
    NotFound,
    Other(anyhow::Error),
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Html("Unauthorized".to_string())).into_response()
            }
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html("Not found".to_string())).into_response()
            }
            AppError::Other(inner) => {
                tracing::error!(err = %inner, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!("Something went wrong: {}", inner)),
                )
                    .into_response()
            }
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Unauthorized => f.write_str("unauthorized"),
            AppError::NotFound => f.write_str("not found"),
            AppError::Other(inner) => Display::fmt(inner, f),
        }
    }
}

impl Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Unauthorized => f.write_str("Unauthorized"),
            AppError::NotFound => f.write_str("NotFound"),
            AppError::Other(inner) => Debug::fmt(inner, f),
        }
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>` to turn them into
// `Result<_, AppError>`. That way you don't need to do that manually.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Other(err.into())
    }
}
