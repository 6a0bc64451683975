//! Outbound URL composition.
//!
//! Once a channel has been picked for a request, the inbound path is rewritten
//! into the shape that channel expects and joined onto its base URL.

use super::channel_type::ChannelType;
use crate::core::config::{RelayConfig, DEFAULT_EDGE_GATEWAY_PREFIXES};
use std::borrow::Cow;

/// OpenAI-compatible sub-paths that get a `/v1` prefix on strict channels.
const OPENAI_COMPATIBLE_PATHS: &[&str] = &[
    "/chat/completions",
    "/completions",
    "/embeddings",
    "/models",
    "/images/generations",
    "/images/edits",
    "/images/variations",
    "/audio/transcriptions",
    "/audio/translations",
    "/audio/speech",
    "/moderations",
    "/files",
    "/fine-tuning/jobs",
    "/batches",
    "/realtime",
    "/responses",
    "/rerank",
    "/assistants",
    "/threads",
    "/messages",
    "/runs",
    "/vector_stores",
];

/// Add the `/v1` prefix for channels that require it.
///
/// Paths already under `/v1` and paths outside the OpenAI-compatible catalog
/// are returned unchanged.
pub fn normalize_request_path(request_path: &str, channel: ChannelType) -> Cow<'_, str> {
    if !channel.requires_v1_prefix() {
        return Cow::Borrowed(request_path);
    }

    if request_path.starts_with("/v1/") || request_path == "/v1" {
        return Cow::Borrowed(request_path);
    }

    if OPENAI_COMPATIBLE_PATHS
        .iter()
        .any(|path| request_path.starts_with(path))
    {
        return Cow::Owned(format!("/v1{}", request_path));
    }

    Cow::Borrowed(request_path)
}

/// Builds upstream request URLs, special-casing multi-provider edge gateways.
#[derive(Debug, Clone)]
pub struct UrlComposer {
    edge_gateway_prefixes: Vec<String>,
}

impl Default for UrlComposer {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_GATEWAY_PREFIXES.iter().map(|p| p.to_string()))
    }
}

impl UrlComposer {
    pub fn new(edge_gateway_prefixes: impl IntoIterator<Item = String>) -> Self {
        Self {
            edge_gateway_prefixes: edge_gateway_prefixes.into_iter().collect(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.edge_gateway_prefixes.iter().cloned())
    }

    fn is_edge_gateway(&self, base_url: &str) -> bool {
        self.edge_gateway_prefixes
            .iter()
            .any(|prefix| base_url.starts_with(prefix.as_str()))
    }

    /// Compose the full upstream URL for `request_path` on `channel`.
    ///
    /// Edge gateways version OpenAI paths themselves, so the `/v1` prefix is
    /// stripped for plain OpenAI channels and `/openai/deployments` for Azure.
    /// Other gateway/channel combinations are passed through as-is.
    pub fn compose(&self, base_url: &str, request_path: &str, channel: ChannelType) -> String {
        let normalized = normalize_request_path(request_path, channel);

        if self.is_edge_gateway(base_url) {
            match channel {
                ChannelType::OpenAI => {
                    return format!("{}{}", base_url, trim_prefix(&normalized, "/v1"));
                }
                ChannelType::Azure => {
                    return format!(
                        "{}{}",
                        base_url,
                        trim_prefix(&normalized, "/openai/deployments")
                    );
                }
                _ => {}
            }
        }

        format!("{}{}", base_url, normalized)
    }
}

fn trim_prefix<'a>(value: &'a str, prefix: &str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}

/// Compose an upstream URL with the default edge-gateway table.
///
/// # Examples
///
/// ```
/// use llm_relay_core::channel::{full_request_url, ChannelType};
///
/// assert_eq!(
///     full_request_url("https://api.deepseek.com", "/chat/completions", ChannelType::DeepSeek),
///     "https://api.deepseek.com/v1/chat/completions"
/// );
/// ```
pub fn full_request_url(base_url: &str, request_path: &str, channel: ChannelType) -> String {
    UrlComposer::default().compose(base_url, request_path, channel)
}
