//! Per-request relay context.
//!
//! Carries what the routing layer learned about a request to the handlers and
//! the task-execution and billing collaborators behind them.

use crate::core::error::{AppError, Result};
use crate::routing::{RelayFormat, RelayMode, RouteClassification};
use crate::task::{TaskAction, TaskFormFile, TaskSubmitRequest, ValidatedTask};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const API_VERSION_PARAM: &str = "api-version";

/// Pricing data handed to the billing layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceData {
    /// Named multipliers (`seconds`, `size`, ...).
    pub other_ratios: BTreeMap<String, f64>,
}

/// Typed request-scoped state.
///
/// Clones share one task slot, so a task stored through any copy can be taken
/// exactly once across all of them.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: String,
    pub relay_mode: RelayMode,
    pub relay_format: Option<RelayFormat>,
    pub action: Option<TaskAction>,
    pub api_version: Option<String>,
    pub price_data: PriceData,
    task_request: Arc<Mutex<Option<TaskSubmitRequest>>>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>, route: &RouteClassification) -> Self {
        Self {
            request_id: request_id.into(),
            relay_mode: route.mode,
            relay_format: route.format,
            ..Default::default()
        }
    }

    /// Record a validated task. Returns the uploaded files for forwarding.
    pub fn store_task(&mut self, task: ValidatedTask) -> Vec<TaskFormFile> {
        self.action = Some(task.action);
        self.price_data.other_ratios = task.other_ratios;
        *self.task_slot() = Some(task.request);
        task.files
    }

    /// Hand the stored task request to its consumer. Succeeds once.
    pub fn take_task_request(&self) -> Result<TaskSubmitRequest> {
        self.task_slot()
            .take()
            .ok_or_else(|| AppError::Internal("task request not found in context".to_string()))
    }

    pub fn has_task_request(&self) -> bool {
        self.task_slot().is_some()
    }

    fn task_slot(&self) -> MutexGuard<'_, Option<TaskSubmitRequest>> {
        self.task_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// API version for the outbound call: the `api-version` query parameter when
/// present and non-empty, else `fallback` (the channel's configured version).
pub fn resolve_api_version(query: Option<&str>, fallback: Option<&str>) -> Option<String> {
    query
        .and_then(|query| serde_urlencoded::from_str::<Vec<(String, String)>>(query).ok())
        .and_then(|pairs| {
            pairs
                .into_iter()
                .find(|(key, value)| key == API_VERSION_PARAM && !value.is_empty())
                .map(|(_, value)| value)
        })
        .or_else(|| fallback.filter(|v| !v.is_empty()).map(str::to_string))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| AppError::Internal("request context missing".to_string()))
    }
}
