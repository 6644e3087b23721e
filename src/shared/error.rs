use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

static EXPOSE_ERROR_DETAIL: AtomicBool = AtomicBool::new(true);

/// Set once at startup from the resolved environment. When enabled (anything
/// but production), 500 responses carry a `detail` field next to the
/// sanitized message; the detail is always logged server-side either way.
pub fn expose_error_detail(expose: bool) {
    EXPOSE_ERROR_DETAIL.store(expose, Ordering::Relaxed);
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// Error body shape returned to clients
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::ConfigurationError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                    Some(msg),
                )
            }
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(format!("{:#}", e)),
                )
            }
        };

        let expose_detail = EXPOSE_ERROR_DETAIL.load(Ordering::Relaxed);

        let body = match detail {
            Some(detail) if expose_detail => json!({ "message": message, "detail": detail }),
            _ => json!({ "message": message }),
        };

        (status, Json(body)).into_response()
    }
}
