//! Recovery of the real API endpoint from prefixed request paths.
//!
//! Users often paste a base URL with an arbitrary label into their client
//! (`https://host/ABC`), which then calls `/ABC/v1/chat/completions`. The
//! extractor finds the first known endpoint embedded anywhere in the path and
//! drops everything before it.

use super::path::{normalize_path, NormalizedPath};

/// Administrative routes are never subject to prefix recovery.
const ADMIN_API_PREFIX: &str = "/api/";

/// Known endpoint patterns, matched as substrings.
///
/// Order matters: the first entry found anywhere in the path wins, regardless
/// of length. Longer variants of an ambiguous prefix are listed first, with the
/// exception of `/dashboard/`, which intentionally shadows `/v1/dashboard/`.
pub const KNOWN_ENDPOINTS: &[&str] = &[
    // Gemini (longer paths first, with and without trailing slash)
    "/v1/v1beta/openai/models",
    "/v1beta/openai/models",
    "/v1/v1beta/models/",
    "/v1/v1beta/models",
    "/v1beta/models/",
    "/v1beta/models",
    // OpenAI-compatible
    "/v1/chat/completions",
    "/chat/completions",
    "/v1/completions",
    "/completions",
    "/v1/responses",
    "/responses",
    "/v1/embeddings",
    "/embeddings",
    "/v1/images/generations",
    "/images/generations",
    "/v1/images/edits",
    "/images/edits",
    "/v1/audio/transcriptions",
    "/audio/transcriptions",
    "/v1/audio/translations",
    "/audio/translations",
    "/v1/audio/speech",
    "/audio/speech",
    "/v1/moderations",
    "/moderations",
    "/v1/edits",
    "/edits",
    "/v1/rerank",
    "/rerank",
    "/v1/realtime",
    "/realtime",
    // Claude
    "/v1/messages",
    "/messages",
    // Model listing
    "/v1/models/",
    "/v1/models",
    "/models/",
    "/models",
    // Task platforms
    "/mj/",
    "/suno/",
    "/pg/",
    "/kling/",
    "/jimeng/",
    "/v1/video/",
    "/v1/videos/",
    // Dashboard
    "/dashboard/",
    "/v1/dashboard/",
    // Admin API
    "/api/",
];

/// Prefixes that mark a request as an API call rather than a front-end asset.
const API_REQUEST_PREFIXES: &[&str] = &[
    "/v1",
    "/v1beta",
    "/api",
    "/assets",
    "/mj",
    "/suno",
    "/pg",
    // OpenAI-compatible paths without /v1
    "/chat",
    "/completions",
    "/embeddings",
    "/images",
    "/audio",
    "/models",
    "/messages",
    "/moderations",
    "/edits",
    "/files",
    "/fine-tunes",
    "/fine-tuning",
    "/responses",
    "/realtime",
    "/rerank",
    "/engines",
];

/// Extract the canonical API endpoint from a possibly prefixed path.
///
/// Paths under `/api/` are returned unchanged. Otherwise the suffix starting
/// at the first [`KNOWN_ENDPOINTS`] match is returned, or the input itself
/// when nothing matches.
///
/// # Examples
///
/// ```
/// use llm_relay_core::routing::extract_api_endpoint;
///
/// assert_eq!(extract_api_endpoint("/ABC/v1/chat/completions"), "/v1/chat/completions");
/// assert_eq!(extract_api_endpoint("/api/status"), "/api/status");
/// assert_eq!(extract_api_endpoint("/unknown/path"), "/unknown/path");
/// ```
pub fn extract_api_endpoint(path: &str) -> &str {
    if path.starts_with(ADMIN_API_PREFIX) {
        return path;
    }

    KNOWN_ENDPOINTS
        .iter()
        .find_map(|endpoint| path.find(endpoint))
        .map_or(path, |idx| &path[idx..])
}

/// Normalize a raw path and then recover its API endpoint.
pub fn normalize_and_extract(path: &str) -> NormalizedPath {
    let normalized = normalize_path(path);
    let extracted = extract_api_endpoint(normalized.as_str());
    if extracted.len() == normalized.len() {
        return normalized;
    }
    NormalizedPath::from_normalized(extracted.to_string())
}

/// Whether an unmatched request should be answered as an API miss.
pub fn is_api_request(path: &str) -> bool {
    API_REQUEST_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}
