//! Upstream provider integrations.
//!
//! Numeric ids are stable: they are persisted with channel records by the
//! surrounding gateway.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An upstream provider integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Unknown,
    OpenAI,
    Midjourney,
    Azure,
    Ollama,
    MidjourneyPlus,
    OpenAIMax,
    OhMyGPT,
    Custom,
    AILS,
    AIProxy,
    PaLM,
    API2GPT,
    AIGC2D,
    Anthropic,
    Baidu,
    Zhipu,
    Ali,
    Xunfei,
    Ai360,
    OpenRouter,
    AIProxyLibrary,
    FastGPT,
    Tencent,
    Gemini,
    Moonshot,
    ZhipuV4,
    Perplexity,
    LingYiWanWu,
    Aws,
    Cohere,
    MiniMax,
    SunoAPI,
    Dify,
    Jina,
    Cloudflare,
    SiliconFlow,
    VertexAi,
    Mistral,
    DeepSeek,
    MokaAI,
    VolcEngine,
    BaiduV2,
    Xinference,
    Xai,
    Coze,
    Kling,
    Jimeng,
    Vidu,
    Submodel,
    DoubaoVideo,
    Sora,
}

/// Channel table: (type, id, name).
const CHANNEL_TABLE: &[(ChannelType, i32, &str)] = &[
    (ChannelType::Unknown, 0, "unknown"),
    (ChannelType::OpenAI, 1, "openai"),
    (ChannelType::Midjourney, 2, "midjourney"),
    (ChannelType::Azure, 3, "azure"),
    (ChannelType::Ollama, 4, "ollama"),
    (ChannelType::MidjourneyPlus, 5, "midjourney_plus"),
    (ChannelType::OpenAIMax, 6, "openai_max"),
    (ChannelType::OhMyGPT, 7, "ohmygpt"),
    (ChannelType::Custom, 8, "custom"),
    (ChannelType::AILS, 9, "ails"),
    (ChannelType::AIProxy, 10, "aiproxy"),
    (ChannelType::PaLM, 11, "palm"),
    (ChannelType::API2GPT, 12, "api2gpt"),
    (ChannelType::AIGC2D, 13, "aigc2d"),
    (ChannelType::Anthropic, 14, "anthropic"),
    (ChannelType::Baidu, 15, "baidu"),
    (ChannelType::Zhipu, 16, "zhipu"),
    (ChannelType::Ali, 17, "ali"),
    (ChannelType::Xunfei, 18, "xunfei"),
    (ChannelType::Ai360, 19, "360"),
    (ChannelType::OpenRouter, 20, "openrouter"),
    (ChannelType::AIProxyLibrary, 21, "aiproxy_library"),
    (ChannelType::FastGPT, 22, "fastgpt"),
    (ChannelType::Tencent, 23, "tencent"),
    (ChannelType::Gemini, 24, "gemini"),
    (ChannelType::Moonshot, 25, "moonshot"),
    (ChannelType::ZhipuV4, 26, "zhipu_v4"),
    (ChannelType::Perplexity, 27, "perplexity"),
    (ChannelType::LingYiWanWu, 31, "lingyiwanwu"),
    (ChannelType::Aws, 33, "aws"),
    (ChannelType::Cohere, 34, "cohere"),
    (ChannelType::MiniMax, 35, "minimax"),
    (ChannelType::SunoAPI, 36, "suno"),
    (ChannelType::Dify, 37, "dify"),
    (ChannelType::Jina, 38, "jina"),
    (ChannelType::Cloudflare, 39, "cloudflare"),
    (ChannelType::SiliconFlow, 40, "siliconflow"),
    (ChannelType::VertexAi, 41, "vertex_ai"),
    (ChannelType::Mistral, 42, "mistral"),
    (ChannelType::DeepSeek, 43, "deepseek"),
    (ChannelType::MokaAI, 44, "mokaai"),
    (ChannelType::VolcEngine, 45, "volcengine"),
    (ChannelType::BaiduV2, 46, "baidu_v2"),
    (ChannelType::Xinference, 47, "xinference"),
    (ChannelType::Xai, 48, "xai"),
    (ChannelType::Coze, 49, "coze"),
    (ChannelType::Kling, 50, "kling"),
    (ChannelType::Jimeng, 51, "jimeng"),
    (ChannelType::Vidu, 52, "vidu"),
    (ChannelType::Submodel, 53, "submodel"),
    (ChannelType::DoubaoVideo, 54, "doubao_video"),
    (ChannelType::Sora, 55, "sora"),
];

impl ChannelType {
    fn entry(self) -> &'static (ChannelType, i32, &'static str) {
        CHANNEL_TABLE
            .iter()
            .find(|(ty, _, _)| *ty == self)
            .unwrap_or(&CHANNEL_TABLE[0])
    }

    /// Stable numeric id.
    pub fn id(self) -> i32 {
        self.entry().1
    }

    pub fn name(self) -> &'static str {
        self.entry().2
    }

    /// Look up a channel type by its numeric id.
    pub fn from_id(id: i32) -> Option<Self> {
        CHANNEL_TABLE
            .iter()
            .find(|(_, entry_id, _)| *entry_id == id)
            .map(|(ty, _, _)| *ty)
    }

    /// Whether the channel speaks strict OpenAI-style `/v1/...` paths.
    ///
    /// Gemini is included for OpenAI-compatible reverse proxies placed in
    /// front of Gemini.
    pub const fn requires_v1_prefix(self) -> bool {
        matches!(
            self,
            Self::OpenAI
                | Self::OpenAIMax
                | Self::OhMyGPT
                | Self::AILS
                | Self::AIProxy
                | Self::API2GPT
                | Self::AIGC2D
                | Self::OpenRouter
                | Self::AIProxyLibrary
                | Self::FastGPT
                | Self::Moonshot
                | Self::Perplexity
                | Self::LingYiWanWu
                | Self::SiliconFlow
                | Self::Mistral
                | Self::DeepSeek
                | Self::MokaAI
                | Self::Xinference
                | Self::Xai
                | Self::Submodel
                | Self::Sora
                | Self::Ollama
                | Self::Gemini
        )
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for ChannelType {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown channel type id: {}", id))
    }
}

impl From<ChannelType> for i32 {
    fn from(channel: ChannelType) -> Self {
        channel.id()
    }
}

impl Serialize for ChannelType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.id())
    }
}

impl<'de> Deserialize<'de> for ChannelType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = i32::deserialize(deserializer)?;
        ChannelType::try_from(id).map_err(serde::de::Error::custom)
    }
}
