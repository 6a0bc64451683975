//! Core functionality for the relay core.
//!
//! This module contains the ambient components used throughout the crate:
//! - Configuration management
//! - Error handling
//! - Logging setup
//! - HTTP middleware

pub mod config;
pub mod error;
pub mod error_types;
pub mod logging;
pub mod middleware;

// Re-export commonly used types
pub use config::{LogConfig, LogFormat, RelayConfig};
pub use error::{AppError, Result, TaskError};
pub use error_types::TaskErrorCode;
pub use logging::{generate_request_id, init_tracing};
pub use middleware::{normalize_path_middleware, REQUEST_ID_HEADER};
