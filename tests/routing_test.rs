//! Routing tests through the public API: raw client paths are normalized,
//! extracted and classified the way the middleware does it.

use axum::http::{HeaderMap, Method};
use llm_relay_core::{
    channel::{ChannelType, UrlComposer},
    core::RelayConfig,
    routing::{classify, normalize_and_extract, RelayFormat, RelayMode},
};
use pretty_assertions::assert_eq;

fn route(method: Method, raw: &str) -> (String, RelayMode, Option<RelayFormat>) {
    let path = normalize_and_extract(raw);
    let classified = classify(&method, path.as_str(), &HeaderMap::new(), None);
    (path.into_string(), classified.mode, classified.format)
}

#[test]
fn test_client_paths() {
    let cases = [
        (
            Method::POST,
            "//v1//chat/completions",
            "/v1/chat/completions",
            RelayMode::ChatCompletions,
        ),
        (
            Method::POST,
            "/my-alias/chat/completions",
            "/chat/completions",
            RelayMode::ChatCompletions,
        ),
        (
            Method::POST,
            "/proxy/v1/audio/transcriptions",
            "/v1/audio/transcriptions",
            RelayMode::AudioTranscription,
        ),
        (
            Method::POST,
            "/我是奶龙/v1beta/models/gemini-pro:generateContent",
            "/v1beta/models/gemini-pro:generateContent",
            RelayMode::GeminiModels,
        ),
        (
            Method::POST,
            "/ABC/mj/submit/simple-change",
            "/mj/submit/simple-change",
            RelayMode::MidjourneyChange,
        ),
        (
            Method::GET,
            "/ABC/mj/task/123/fetch",
            "/mj/task/123/fetch",
            RelayMode::MidjourneyTaskFetch,
        ),
        (
            Method::POST,
            "/x/suno/submit/music",
            "/suno/submit/music",
            RelayMode::SunoSubmit,
        ),
        (
            Method::GET,
            "/x/v1/videos/video_abc",
            "/v1/videos/video_abc",
            RelayMode::VideoFetchById,
        ),
    ];

    for (method, raw, expected_path, expected_mode) in cases {
        let (path, mode, _) = route(method, raw);
        assert_eq!(path, expected_path, "path for {}", raw);
        assert_eq!(mode, expected_mode, "mode for {}", raw);
    }
}

#[test]
fn test_dashboard_shadowing_is_preserved() {
    let (path, mode, format) = route(Method::GET, "/test/v1/dashboard/billing/usage");
    assert_eq!(path, "/dashboard/billing/usage");
    assert_eq!(mode, RelayMode::Unknown);
    assert_eq!(format, None);
}

#[test]
fn test_admin_paths_untouched() {
    let (path, mode, _) = route(Method::GET, "/api/v1/chat/completions");
    assert_eq!(path, "/api/v1/chat/completions");
    assert_eq!(mode, RelayMode::Unknown);
}

#[test]
fn test_classified_path_composes_for_channel() {
    let composer = UrlComposer::from_config(&RelayConfig::default());
    let path = normalize_and_extract("/alias/chat/completions");

    assert_eq!(
        composer.compose("https://openrouter.ai/api", path.as_str(), ChannelType::OpenRouter),
        "https://openrouter.ai/api/v1/chat/completions"
    );
    assert_eq!(
        composer.compose(
            "https://gateway.ai.cloudflare.com/v1/acct/gw/openai",
            path.as_str(),
            ChannelType::OpenAI
        ),
        "https://gateway.ai.cloudflare.com/v1/acct/gw/openai/chat/completions"
    );
    assert_eq!(
        composer.compose("https://api.anthropic.com", "/v1/messages", ChannelType::Anthropic),
        "https://api.anthropic.com/v1/messages"
    );
}
