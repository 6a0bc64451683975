//! Error types and handling for the relay core.
//!
//! [`AppError`] is the crate-wide error type and converts into an OpenAI-style
//! JSON response. [`TaskError`] is the typed validation failure produced while
//! normalizing asynchronous task submissions.

use crate::core::error_types::{
    TaskErrorCode, ERROR_TYPE_API, ERROR_TYPE_INVALID_REQUEST, ERROR_TYPE_UPSTREAM,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error as StdError;
use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request path did not resolve to any known relay route.
    #[error("Invalid URL ({method} {path})")]
    NotFound { method: String, path: String },

    /// Task submission failed validation
    #[error(transparent)]
    Task(#[from] TaskError),

    /// Configuration-related errors (bad environment values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Generic internal server errors with custom message
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::NotFound {
            method: method.into(),
            path: path.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, error_message) = match self {
            AppError::Task(err) => return err.into_response(),
            err @ AppError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ERROR_TYPE_INVALID_REQUEST,
                err.to_string(),
            ),
            AppError::Config(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ERROR_TYPE_API,
                e.to_string(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ERROR_TYPE_API, msg),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type,
                "code": status.as_u16()
            }
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

/// A task submission rejected by local validation.
///
/// Always fully populated; the HTTP layer maps it to `status_code` with
/// `message` as the human-readable text.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TaskError {
    pub code: TaskErrorCode,
    pub message: String,
    pub status_code: StatusCode,
    /// `true` when the failure was detected locally, `false` for upstream failures.
    pub local_error: bool,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl TaskError {
    /// A locally detected `400 Bad Request` failure.
    pub fn local(code: TaskErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            local_error: true,
            source: None,
        }
    }

    /// A locally detected failure wrapping the underlying parse error.
    pub fn from_source<E>(code: TaskErrorCode, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            code,
            message: err.to_string(),
            status_code: StatusCode::BAD_REQUEST,
            local_error: true,
            source: Some(Box::new(err)),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let error_type = if self.local_error {
            ERROR_TYPE_INVALID_REQUEST
        } else {
            ERROR_TYPE_UPSTREAM
        };
        let body = Json(json!({
            "error": {
                "message": self.message,
                "type": error_type,
                "code": self.code.as_str()
            }
        }));
        (self.status_code, body).into_response()
    }
}
