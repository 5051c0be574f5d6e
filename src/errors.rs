use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(StoreError),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn account_not_found() -> Self {
        AppError::NotFound("Account not found".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::InsufficientFunds => {
                (StatusCode::BAD_REQUEST, "Insufficient funds").into_response()
            }
            AppError::InvalidOperation(_) => {
                (StatusCode::BAD_REQUEST, "Invalid operation").into_response()
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AppError::Store(e) => {
                error!("Store failure surfaced to client: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            AppError::Internal(msg) => {
                error!("Internal failure surfaced to client: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match value {
            // the row vanished between load and write
            StoreError::Missing(_) => AppError::account_not_found(),
            other => AppError::Store(other),
        }
    }
}
