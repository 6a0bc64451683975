//! Shared constants for structured API errors and task validation codes.

use std::fmt;

pub const ERROR_TYPE_API: &str = "api_error";
pub const ERROR_TYPE_INVALID_REQUEST: &str = "invalid_request_error";
pub const ERROR_TYPE_UPSTREAM: &str = "upstream_error";

pub const TASK_CODE_MISSING_MODEL: &str = "missing_model";
pub const TASK_CODE_INVALID_REQUEST: &str = "invalid_request";
pub const TASK_CODE_INVALID_SIZE: &str = "invalid_size";
pub const TASK_CODE_INVALID_MULTIPART_FORM: &str = "invalid_multipart_form";
pub const TASK_CODE_INVALID_JSON: &str = "invalid_json";

/// Machine-readable code attached to a [`TaskError`](crate::core::error::TaskError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskErrorCode {
    MissingModel,
    InvalidRequest,
    InvalidSize,
    InvalidMultipartForm,
    InvalidJson,
}

impl TaskErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingModel => TASK_CODE_MISSING_MODEL,
            Self::InvalidRequest => TASK_CODE_INVALID_REQUEST,
            Self::InvalidSize => TASK_CODE_INVALID_SIZE,
            Self::InvalidMultipartForm => TASK_CODE_INVALID_MULTIPART_FORM,
            Self::InvalidJson => TASK_CODE_INVALID_JSON,
        }
    }
}

impl fmt::Display for TaskErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
