use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Malformed value: {0}")]
    InvalidFormat(String),
    #[error("Service duration must be positive")]
    InvalidServiceDuration,
    #[error("Requested slot is no longer available")]
    SlotUnavailable,
    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("Cancellation window has expired")]
    WindowExpired,
    #[error("Booking can no longer be modified")]
    NotModifiable,
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    if code == "2067" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource already exists (duplicate entry)" })),
                        )
                            .into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidFormat(msg) => {
                (StatusCode::BAD_REQUEST, format!("Malformed value: {}", msg))
            }
            AppError::InvalidServiceDuration => {
                (StatusCode::BAD_REQUEST, "Service duration must be positive".to_string())
            }
            AppError::SlotUnavailable => {
                // Retryable: the caller should re-fetch availability and pick again.
                return (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "Selected time slot is no longer available",
                        "retryable": true
                    })),
                )
                    .into_response();
            }
            AppError::InvalidTransition { from, to } => (
                StatusCode::CONFLICT,
                format!("Illegal status transition: {} -> {}", from, to),
            ),
            AppError::WindowExpired => (
                StatusCode::CONFLICT,
                "Cancellation window has expired".to_string(),
            ),
            AppError::NotModifiable => (
                StatusCode::CONFLICT,
                "Booking can no longer be modified".to_string(),
            ),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
