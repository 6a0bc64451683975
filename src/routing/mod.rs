//! Inbound request routing: path cleanup, endpoint recovery and intent
//! classification.
//!
//! Everything here is a pure function over immutable tables.

pub mod endpoint;
pub mod format;
pub mod path;
pub mod relay_mode;

pub use endpoint::{extract_api_endpoint, is_api_request, normalize_and_extract, KNOWN_ENDPOINTS};
pub use format::{models_channel, relay_format, RelayFormat};
pub use path::{normalize_path, NormalizedPath};
pub use relay_mode::{
    is_video_path, midjourney_relay_mode, relay_mode_from_path, suno_relay_mode,
    video_relay_mode, RelayMode,
};

use crate::channel::ChannelType;
use axum::http::{HeaderMap, Method};

const SUNO_PREFIX: &str = "/suno";

/// Everything the router learns about a request before dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteClassification {
    pub mode: RelayMode,
    pub format: Option<RelayFormat>,
    /// Listing shape for `GET` model listings.
    pub models_channel: Option<ChannelType>,
}

impl RouteClassification {
    /// A request nothing recognized.
    pub fn is_not_found(&self) -> bool {
        self.mode.is_unknown() && self.format.is_none() && self.models_channel.is_none()
    }
}

/// Classify a normalized-and-extracted request.
///
/// Suno and video task routes are method-aware and dispatched first; all
/// other paths go through [`relay_mode_from_path`].
///
/// # Examples
///
/// ```
/// use axum::http::{HeaderMap, Method};
/// use llm_relay_core::routing::{classify, RelayFormat, RelayMode};
///
/// let route = classify(&Method::POST, "/v1/chat/completions", &HeaderMap::new(), None);
/// assert_eq!(route.mode, RelayMode::ChatCompletions);
/// assert_eq!(route.format, Some(RelayFormat::OpenAI));
/// ```
pub fn classify(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    query: Option<&str>,
) -> RouteClassification {
    let mode = if is_suno_path(path) {
        suno_relay_mode(method, path)
    } else if is_video_path(path) {
        video_relay_mode(method, path)
    } else {
        relay_mode_from_path(path)
    };

    RouteClassification {
        mode,
        format: relay_format(path),
        models_channel: models_channel(method, path, headers, query),
    }
}

fn is_suno_path(path: &str) -> bool {
    path.strip_prefix(SUNO_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_simple(method: Method, path: &str) -> RouteClassification {
        classify(&method, path, &HeaderMap::new(), None)
    }

    #[test]
    fn test_claude_messages_is_routable() {
        let route = classify_simple(Method::POST, "/v1/messages");
        assert_eq!(route.mode, RelayMode::Unknown);
        assert_eq!(route.format, Some(RelayFormat::Claude));
        assert!(!route.is_not_found());
    }

    #[test]
    fn test_model_listing() {
        let route = classify_simple(Method::GET, "/v1/models");
        assert_eq!(route.mode, RelayMode::GeminiModels);
        assert_eq!(route.models_channel, Some(ChannelType::OpenAI));

        let route = classify_simple(Method::GET, "/v1beta/openai/models");
        assert_eq!(route.mode, RelayMode::Unknown);
        assert!(!route.is_not_found());
    }

    #[test]
    fn test_suno_dispatch_first() {
        assert_eq!(
            classify_simple(Method::POST, "/suno/submit/music").mode,
            RelayMode::SunoSubmit
        );
        assert_eq!(
            classify_simple(Method::GET, "/suno/fetch/abc").mode,
            RelayMode::SunoFetchById
        );
        assert_eq!(
            classify_simple(Method::POST, "/suno/fetch").mode,
            RelayMode::SunoFetch
        );
    }

    #[test]
    fn test_suno_prefix_is_segment_bounded() {
        assert!(classify_simple(Method::POST, "/sunox/submit/music").is_not_found());
        assert!(classify_simple(Method::GET, "/suno-fetch/abc").is_not_found());
        assert!(!is_suno_path("/sunox"));
        assert!(is_suno_path("/suno"));
    }

    #[test]
    fn test_video_dispatch_first() {
        assert_eq!(
            classify_simple(Method::POST, "/v1/videos").mode,
            RelayMode::VideoSubmit
        );
        assert_eq!(
            classify_simple(Method::GET, "/v1/videos/video_123").mode,
            RelayMode::VideoFetchById
        );
        assert_eq!(
            classify_simple(Method::GET, "/kling/v1/videos/text2video/t1").mode,
            RelayMode::VideoFetchById
        );
        assert!(classify_simple(Method::GET, "/v1/videos").is_not_found());
    }

    #[test]
    fn test_not_found() {
        assert!(classify_simple(Method::POST, "/unknown/path").is_not_found());
        assert!(classify_simple(Method::POST, "/mj/submit/unknown").is_not_found());
        assert!(classify_simple(Method::GET, "/dashboard/billing/usage").is_not_found());
    }
}
