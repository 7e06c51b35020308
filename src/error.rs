// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

/// API error with an HTTP status code and a client-safe JSON body.
///
/// A record that is absent and a record owned by a different user both map to
/// `NotFound`, so a client cannot probe for the existence of other users'
/// records.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(String),

    // 401 Unauthorized
    #[error("{0}")]
    Unauthorized(String),

    // 404 Not Found (also covers not-owned)
    #[error("{0}")]
    NotFound(String),

    // 500 Internal Server Error
    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Database(sqlx::Error::RowNotFound) => "NOT_FOUND",
            ApiError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Client-safe message; database driver details stay out of responses.
    pub fn message(&self) -> String {
        match self {
            ApiError::Database(sqlx::Error::RowNotFound) => "record not found".to_string(),
            ApiError::Database(_) => "database error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Database(ref e) = self {
            if !matches!(e, sqlx::Error::RowNotFound) {
                tracing::error!("database error: {}", e);
            }
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
