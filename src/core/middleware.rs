//! HTTP middleware for inbound path cleanup and request context setup.
//!
//! [`normalize_path_middleware`] must wrap the router from the outside: it
//! rewrites the request URI, so it has to run before route matching.

use crate::api::context::{resolve_api_version, RequestContext};
use crate::core::logging::generate_request_id;
use crate::routing::{classify, normalize_and_extract};
use axum::{
    extract::Request,
    http::{uri::PathAndQuery, HeaderValue, Uri},
    middleware::Next,
    response::Response,
};

/// Request/response header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Normalize and extract the request path, then classify the request.
///
/// The rewritten URI keeps its query string. The resulting
/// [`RouteClassification`](crate::routing::RouteClassification) and a fresh
/// [`RequestContext`] are stored as request extensions, and the request id is
/// echoed on the response.
pub async fn normalize_path_middleware(mut request: Request, next: Next) -> Response {
    let raw_path = request.uri().path().to_string();
    let normalized = normalize_and_extract(&raw_path);

    if normalized.as_str() != raw_path {
        match rewrite_path(request.uri(), normalized.as_str()) {
            Ok(uri) => {
                tracing::debug!(from = %raw_path, to = %normalized, "Rewrote request path");
                *request.uri_mut() = uri;
            }
            Err(e) => {
                tracing::warn!("Failed to rewrite request path {}: {}", raw_path, e);
            }
        }
    }

    let route = classify(
        request.method(),
        request.uri().path(),
        request.headers(),
        request.uri().query(),
    );

    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let mut context = RequestContext::new(request_id.clone(), &route);
    context.api_version = resolve_api_version(request.uri().query(), None);

    tracing::trace!(
        request_id = %request_id,
        mode = %route.mode,
        "Classified {} {}",
        request.method(),
        request.uri().path()
    );

    request.extensions_mut().insert(route);
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Replace the path of `uri`, keeping scheme, authority and query.
fn rewrite_path(uri: &Uri, path: &str) -> anyhow::Result<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>()?);
    Ok(Uri::from_parts(parts)?)
}
