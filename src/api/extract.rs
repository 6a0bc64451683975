//! Axum extractors for classified routes and task submissions.

use crate::core::error::{AppError, TaskError};
use crate::routing::{classify, RouteClassification};
use crate::task::{normalize_task_payload, read_task_payload, ValidatedTask};
use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};

#[axum::async_trait]
impl<S> FromRequestParts<S> for RouteClassification
where
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Uses the classification left by the normalizing middleware, or
    /// classifies on the spot. Unrecognized routes are rejected as not found.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let route = match parts.extensions.get::<RouteClassification>() {
            Some(route) => *route,
            None => classify(
                &parts.method,
                parts.uri.path(),
                &parts.headers,
                parts.uri.query(),
            ),
        };

        if route.is_not_found() {
            tracing::debug!("No relay route for {} {}", parts.method, parts.uri.path());
            return Err(AppError::not_found(
                parts.method.as_str(),
                parts.uri.path(),
            ));
        }

        Ok(route)
    }
}

/// A validated task submission taken from a JSON or multipart body.
#[derive(Debug, Clone)]
pub struct TaskSubmission(pub ValidatedTask);

#[axum::async_trait]
impl<S> FromRequest<S> for TaskSubmission
where
    S: Send + Sync,
{
    type Rejection = TaskError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let payload = read_task_payload(req).await?;
        normalize_task_payload(payload).map(TaskSubmission)
    }
}
