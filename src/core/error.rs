use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("Invalid pagination parameter: {0}")]
    InvalidPagination(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // Range violations map to 404, matching the upstream dataset's
            // long-standing API convention.
            AppError::InvalidRange(ref msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InvalidSortField(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidPagination(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::DataIntegrity(ref msg) => {
                tracing::error!("Data integrity error surfaced at request time: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), None));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
