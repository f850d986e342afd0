// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::DatabaseError;

/// Every failure a handler can report. Each variant carries a stable `name`
/// that clients dispatch on, and maps to exactly one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{message}")]
    MissingParameters { message: String, missing: Vec<String> },

    #[error("{0}")]
    InvalidParameter(String),

    #[error("There was an error adding the activity to the routine")]
    FailedToAddActivity,

    // 401 Unauthorized (no usable credentials)
    #[error("{0}")]
    MissingUser(String),

    // 403 Forbidden (authenticated, but not the owner)
    #[error("{0}")]
    Unauthorized(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // 500 Internal Server Error
    #[error("{0}")]
    InternalServerError(String),
}

/// Convenience type alias for handler return values
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Name clients use to tell errors apart
    pub fn name(&self) -> &'static str {
        match self {
            ApiError::MissingParameters { .. } => "MissingParameters",
            ApiError::InvalidParameter(_) => "InvalidParameter",
            ApiError::FailedToAddActivity => "FailedToAddActivity",
            ApiError::MissingUser(_) => "MissingUserError",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::NotFound(_) => "NotFound",
            ApiError::InternalServerError(_) => "InternalServerError",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameters { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::FailedToAddActivity => StatusCode::BAD_REQUEST,
            ApiError::MissingUser(_) => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingParameters { .. } => "MISSING_PARAMETERS",
            ApiError::InvalidParameter(_) => "INVALID_PARAMETER",
            ApiError::FailedToAddActivity => "FAILED_TO_ADD_ACTIVITY",
            ApiError::MissingUser(_) => "MISSING_USER",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "error": true,
            "name": self.name(),
            "message": self.to_string(),
            "code": self.error_code(),
        });

        if let ApiError::MissingParameters { missing, .. } = self {
            body["missing"] = json!(missing);
        }

        body
    }
}

// Static constructor methods
impl ApiError {
    pub fn missing_parameters(message: impl Into<String>, missing: Vec<String>) -> Self {
        ApiError::MissingParameters {
            message: message.into(),
            missing,
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        ApiError::InvalidParameter(message.into())
    }

    pub fn missing_user(message: impl Into<String>) -> Self {
        ApiError::MissingUser(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but never hand storage details to the client
        match err {
            DatabaseError::Sqlx(sqlx_err) => {
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
