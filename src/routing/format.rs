//! Wire-dialect detection.
//!
//! The relay format tells downstream converters which provider dialect the
//! client body is written in. It is decided from the path alone, except for
//! model listings where headers and the query pick the response shape.

use crate::channel::ChannelType;
use axum::http::{HeaderMap, Method};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The dialect a relay request is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayFormat {
    #[serde(rename = "openai")]
    OpenAI,
    Claude,
    Gemini,
    #[serde(rename = "openai_responses")]
    OpenAIResponses,
    #[serde(rename = "openai_image")]
    OpenAIImage,
    Embedding,
    #[serde(rename = "openai_audio")]
    OpenAIAudio,
    Rerank,
    #[serde(rename = "openai_realtime")]
    OpenAIRealtime,
}

impl RelayFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            RelayFormat::OpenAI => "openai",
            RelayFormat::Claude => "claude",
            RelayFormat::Gemini => "gemini",
            RelayFormat::OpenAIResponses => "openai_responses",
            RelayFormat::OpenAIImage => "openai_image",
            RelayFormat::Embedding => "embedding",
            RelayFormat::OpenAIAudio => "openai_audio",
            RelayFormat::Rerank => "rerank",
            RelayFormat::OpenAIRealtime => "openai_realtime",
        }
    }
}

impl fmt::Display for RelayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum FormatRule {
    Prefix(&'static [&'static str]),
    /// `/engines/<model>/embeddings`
    EngineEmbeddings,
    /// `/models/<model>:<action>`
    ModelAction,
}

impl FormatRule {
    fn matches(self, path: &str) -> bool {
        match self {
            FormatRule::Prefix(prefixes) => prefixes.iter().any(|p| path.starts_with(p)),
            FormatRule::EngineEmbeddings => path
                .strip_prefix("/engines/")
                .is_some_and(|rest| rest.ends_with("/embeddings") && !rest.starts_with('/')),
            FormatRule::ModelAction => path
                .strip_prefix("/models/")
                .is_some_and(|rest| rest.contains(':')),
        }
    }
}

/// Evaluated against the path with any leading `/v1` removed.
const FORMAT_RULES: &[(FormatRule, RelayFormat)] = &[
    (FormatRule::Prefix(&["/v1beta/models/"]), RelayFormat::Gemini),
    (FormatRule::EngineEmbeddings, RelayFormat::Gemini),
    (FormatRule::ModelAction, RelayFormat::Gemini),
    (FormatRule::Prefix(&["/messages"]), RelayFormat::Claude),
    (FormatRule::Prefix(&["/responses"]), RelayFormat::OpenAIResponses),
    (
        FormatRule::Prefix(&["/images/generations", "/images/edits", "/edits"]),
        RelayFormat::OpenAIImage,
    ),
    (FormatRule::Prefix(&["/embeddings"]), RelayFormat::Embedding),
    (FormatRule::Prefix(&["/audio/"]), RelayFormat::OpenAIAudio),
    (FormatRule::Prefix(&["/rerank"]), RelayFormat::Rerank),
    (FormatRule::Prefix(&["/realtime"]), RelayFormat::OpenAIRealtime),
    (
        FormatRule::Prefix(&[
            "/chat/completions",
            "/completions",
            "/moderations",
            "/pg/chat/completions",
        ]),
        RelayFormat::OpenAI,
    ),
];

/// Drop one leading `/v1` segment, leaving `/v1beta` alone.
fn strip_version(path: &str) -> &str {
    match path.strip_prefix("/v1") {
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Detect the relay format of a normalized path.
///
/// Model listings carry no relay format; see [`models_channel`].
pub fn relay_format(path: &str) -> Option<RelayFormat> {
    let path = strip_version(path);
    FORMAT_RULES
        .iter()
        .find(|(rule, _)| rule.matches(path))
        .map(|(_, format)| *format)
}

fn header_present(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| !value.is_empty())
}

fn query_param_present(query: Option<&str>, name: &str) -> bool {
    let Some(query) = query else {
        return false;
    };
    serde_urlencoded::from_str::<Vec<(String, String)>>(query)
        .map(|pairs| pairs.iter().any(|(k, v)| k == name && !v.is_empty()))
        .unwrap_or(false)
}

/// Pick the provider whose listing shape a models request expects.
///
/// Returns `None` for anything that is not a `GET` on a models listing or a
/// single-model lookup.
pub fn models_channel(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    query: Option<&str>,
) -> Option<ChannelType> {
    if *method != Method::GET {
        return None;
    }

    let path = strip_version(path);

    // Beta listings only exist as bare collections.
    if let Some(rest) = path.strip_prefix("/v1beta/openai/models") {
        return (rest.is_empty() || rest == "/").then_some(ChannelType::OpenAI);
    }
    if let Some(rest) = path.strip_prefix("/v1beta/models") {
        return (rest.is_empty() || rest == "/").then_some(ChannelType::Gemini);
    }

    let rest = path.strip_prefix("/models")?;
    let is_listing = rest.is_empty() || rest == "/";
    if !is_listing && (!rest.starts_with('/') || rest.contains(':')) {
        return None;
    }

    if header_present(headers, "x-api-key") && header_present(headers, "anthropic-version") {
        return Some(ChannelType::Anthropic);
    }
    if is_listing
        && (header_present(headers, "x-goog-api-key") || query_param_present(query, "key"))
    {
        return Some(ChannelType::Gemini);
    }
    Some(ChannelType::OpenAI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_openai_family() {
        for path in [
            "/v1/chat/completions",
            "/chat/completions",
            "/v1/completions",
            "/v1/moderations",
            "/pg/chat/completions",
        ] {
            assert_eq!(relay_format(path), Some(RelayFormat::OpenAI), "{}", path);
        }
    }

    #[test]
    fn test_dialects() {
        assert_eq!(relay_format("/v1/messages"), Some(RelayFormat::Claude));
        assert_eq!(relay_format("/messages"), Some(RelayFormat::Claude));
        assert_eq!(relay_format("/v1/responses"), Some(RelayFormat::OpenAIResponses));
        assert_eq!(relay_format("/v1/images/edits"), Some(RelayFormat::OpenAIImage));
        assert_eq!(relay_format("/v1/edits"), Some(RelayFormat::OpenAIImage));
        assert_eq!(relay_format("/embeddings"), Some(RelayFormat::Embedding));
        assert_eq!(relay_format("/v1/audio/speech"), Some(RelayFormat::OpenAIAudio));
        assert_eq!(relay_format("/v1/rerank"), Some(RelayFormat::Rerank));
        assert_eq!(relay_format("/v1/realtime"), Some(RelayFormat::OpenAIRealtime));
    }

    #[test]
    fn test_gemini_forms() {
        assert_eq!(
            relay_format("/v1beta/models/gemini-pro:generateContent"),
            Some(RelayFormat::Gemini)
        );
        assert_eq!(
            relay_format("/v1/v1beta/models/gemini-pro:streamGenerateContent"),
            Some(RelayFormat::Gemini)
        );
        assert_eq!(
            relay_format("/v1/models/gemini-pro:generateContent"),
            Some(RelayFormat::Gemini)
        );
        assert_eq!(
            relay_format("/v1/engines/text-embedding-004/embeddings"),
            Some(RelayFormat::Gemini)
        );
    }

    #[test]
    fn test_no_format() {
        assert_eq!(relay_format("/v1/models"), None);
        assert_eq!(relay_format("/v1beta/models"), None);
        assert_eq!(relay_format("/mj/submit/imagine"), None);
        assert_eq!(relay_format("/v1"), None);
        assert_eq!(relay_format("/"), None);
    }

    #[test]
    fn test_models_channel_default_openai() {
        let empty = HeaderMap::new();
        assert_eq!(
            models_channel(&Method::GET, "/v1/models", &empty, None),
            Some(ChannelType::OpenAI)
        );
        assert_eq!(
            models_channel(&Method::GET, "/v1/models/gpt-4o", &empty, None),
            Some(ChannelType::OpenAI)
        );
    }

    #[test]
    fn test_models_channel_anthropic() {
        let h = headers(&[("x-api-key", "sk-ant"), ("anthropic-version", "2023-06-01")]);
        assert_eq!(
            models_channel(&Method::GET, "/v1/models", &h, None),
            Some(ChannelType::Anthropic)
        );
        assert_eq!(
            models_channel(&Method::GET, "/v1/models/claude-3-5-sonnet", &h, None),
            Some(ChannelType::Anthropic)
        );

        // both headers are required
        let only_key = headers(&[("x-api-key", "sk-ant")]);
        assert_eq!(
            models_channel(&Method::GET, "/v1/models", &only_key, None),
            Some(ChannelType::OpenAI)
        );
    }

    #[test]
    fn test_models_channel_gemini_list_only() {
        let h = headers(&[("x-goog-api-key", "g-key")]);
        assert_eq!(
            models_channel(&Method::GET, "/v1/models", &h, None),
            Some(ChannelType::Gemini)
        );
        assert_eq!(
            models_channel(&Method::GET, "/v1/models/gemini-pro", &h, None),
            Some(ChannelType::OpenAI)
        );

        let empty = HeaderMap::new();
        assert_eq!(
            models_channel(&Method::GET, "/v1/models", &empty, Some("key=abc")),
            Some(ChannelType::Gemini)
        );
        assert_eq!(
            models_channel(&Method::GET, "/v1/models", &empty, Some("key=")),
            Some(ChannelType::OpenAI)
        );
    }

    #[test]
    fn test_models_channel_beta_paths() {
        let empty = HeaderMap::new();
        assert_eq!(
            models_channel(&Method::GET, "/v1beta/models", &empty, None),
            Some(ChannelType::Gemini)
        );
        assert_eq!(
            models_channel(&Method::GET, "/v1beta/openai/models", &empty, None),
            Some(ChannelType::OpenAI)
        );
        assert_eq!(
            models_channel(&Method::GET, "/v1/v1beta/models/", &empty, None),
            Some(ChannelType::Gemini)
        );
    }

    #[test]
    fn test_models_channel_beta_subpaths_are_not_listings() {
        let empty = HeaderMap::new();
        for path in [
            "/v1beta/models/gemini-pro",
            "/v1beta/models/gemini-pro:generateContent",
            "/v1beta/openai/models/gpt-4o",
            "/v1beta/modelsx",
        ] {
            assert_eq!(models_channel(&Method::GET, path, &empty, None), None, "{}", path);
        }
    }

    #[test]
    fn test_models_channel_ignores_other_requests() {
        let empty = HeaderMap::new();
        assert_eq!(models_channel(&Method::POST, "/v1/models", &empty, None), None);
        assert_eq!(
            models_channel(&Method::GET, "/v1/chat/completions", &empty, None),
            None
        );
        assert_eq!(models_channel(&Method::GET, "/v1/modelsx", &empty, None), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&RelayFormat::OpenAIResponses).unwrap(),
            "\"openai_responses\""
        );
        assert_eq!(serde_json::to_string(&RelayFormat::Claude).unwrap(), "\"claude\"");
        assert_eq!(RelayFormat::OpenAI.to_string(), "openai");
    }
}
