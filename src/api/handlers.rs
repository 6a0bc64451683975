//! Router assembly and fallback handling.

use crate::core::config::RelayConfig;
use crate::core::error::AppError;
use crate::core::middleware::normalize_path_middleware;
use crate::routing::is_api_request;
use axum::{
    extract::DefaultBodyLimit,
    http::{Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// The not-found error for a request no relay route recognized.
pub fn relay_not_found(method: &Method, path: &str) -> AppError {
    tracing::debug!("Relay route not found: {} {}", method, path);
    AppError::not_found(method.as_str(), path)
}

/// Fallback for unmatched requests.
///
/// API paths get the JSON relay-not-found error; anything else is left to the
/// static front-end and answered with a bare 404 here.
pub async fn api_fallback(method: Method, uri: Uri) -> Response {
    if is_api_request(uri.path()) {
        return relay_not_found(&method, uri.path()).into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

/// Wrap relay routes with the fallback, the task body limit, tracing and path
/// normalization.
///
/// Normalization is installed on an outer router so the rewritten path is the
/// one the inner router matches against.
pub fn relay_router(routes: Router, config: &RelayConfig) -> Router {
    let inner = routes
        .fallback(api_fallback)
        .layer(DefaultBodyLimit::max(config.task_max_body_bytes));

    Router::new().fallback_service(inner).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(normalize_path_middleware)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post};
    use tower::ServiceExt;

    async fn ok() -> &'static str {
        "ok"
    }

    fn app() -> Router {
        let routes = Router::new().route("/v1/chat/completions", post(ok));
        relay_router(routes, &RelayConfig::default())
    }

    #[tokio::test]
    async fn test_prefixed_path_reaches_route() {
        let request = Request::builder()
            .method("POST")
            .uri("//my-alias/v1/chat/completions")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_miss_is_json_not_found() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/unknown")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], "Invalid URL (POST /v1/unknown)");
        assert_eq!(json["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_front_end_miss_is_plain_not_found() {
        let request = Request::builder()
            .method("GET")
            .uri("/console/login")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
