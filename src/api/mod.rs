//! HTTP layer glue for axum.
//!
//! This module contains the per-request context, the extractors that run
//! classification and task validation, and router assembly with the JSON
//! not-found fallback.

pub mod context;
pub mod extract;
pub mod handlers;

// Re-export commonly used types
pub use context::{resolve_api_version, PriceData, RequestContext};
pub use extract::TaskSubmission;
pub use handlers::{api_fallback, relay_not_found, relay_router};
