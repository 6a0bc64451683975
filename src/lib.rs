//! LLM Relay Core - request classification and URL translation for a
//! multi-provider AI gateway
//!
//! This library accepts requests written against several provider dialects and
//! works out what they are and where they should go:
//!
//! - **Path Normalization**: Collapse redundant separators while keeping trailing-slash semantics
//! - **Endpoint Extraction**: Recover the real API call from arbitrarily prefixed client paths
//! - **Relay Classification**: Map method + path + headers to a request intent and wire dialect
//! - **URL Composition**: Build the exact upstream URL for a channel, including edge-gateway rewrites
//! - **Task Normalization**: Validate JSON and multipart video/image task submissions
//!
//! # Architecture
//!
//! The codebase is organized into these layers:
//!
//! - [`core`]: Ambient functionality (config, errors, logging, middleware)
//! - [`routing`]: Inbound path cleanup and classification
//! - [`channel`]: Channel types and outbound URL composition
//! - [`task`]: Task submission parsing and validation
//! - [`api`]: Axum extractors, request context and router assembly
//!
//! # Configuration
//!
//! Optional environment variables:
//! - `EDGE_GATEWAY_PREFIXES`: Comma-separated base-URL prefixes treated as edge gateways
//!   (default: `https://gateway.ai.cloudflare.com`)
//! - `TASK_MAX_BODY_BYTES`: Body limit for task submissions (default: 32 MiB)
//! - `LOG_FORMAT`: `text` or `json` (default: text)
//! - `NO_COLOR`: Disable ANSI colors in log output
//! - `RUST_LOG`: Log filter (default: `info,llm_relay_core=debug`)

pub mod api;
pub mod channel;
pub mod core;
pub mod routing;
pub mod task;

// Re-export commonly used types for convenience
pub use api::{relay_router, RequestContext, TaskSubmission};
pub use channel::{full_request_url, ChannelType, UrlComposer};
pub use crate::core::{AppError, RelayConfig, Result, TaskError, TaskErrorCode};
pub use routing::{classify, normalize_and_extract, RelayFormat, RelayMode, RouteClassification};
pub use task::{normalize_task_payload, TaskAction, TaskSubmitRequest, ValidatedTask};
