use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use stubby_core::RepositoryError;
use stubby_redirector::RedirectorError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("short url not found: {0}")]
    NotFound(String),
    #[error("cannot allocate a new short url right now")]
    Unavailable,
    #[error("internal error")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::InvalidInput(message) => AppError::InvalidInput(message),
            RepositoryError::NotFound(id) => AppError::NotFound(id),
            RepositoryError::GenerationExhausted { .. } => AppError::Unavailable,
        }
    }
}

impl From<RedirectorError> for AppError {
    fn from(error: RedirectorError) -> Self {
        match error {
            RedirectorError::Repository(source) => source.into(),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Internal(detail) = &self {
            error!(detail = %detail, "request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
