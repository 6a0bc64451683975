//! Relay-mode classification.
//!
//! A relay mode is the request intent (chat completion, image edit, a
//! Midjourney action...) derived from an already normalized-and-extracted
//! path. Rules are ordered tables evaluated top to bottom; the first match
//! wins.

use axum::http::Method;
use std::fmt;

/// The discrete intent of a relay request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RelayMode {
    #[default]
    Unknown,
    ChatCompletions,
    Completions,
    Embeddings,
    Moderations,
    ImagesGenerations,
    ImagesEdits,
    Edits,

    MidjourneyImagine,
    MidjourneyDescribe,
    MidjourneyBlend,
    /// Both `change` and `simple-change` submissions.
    MidjourneyChange,
    MidjourneyNotify,
    MidjourneyTaskFetch,
    MidjourneyTaskImageSeed,
    MidjourneyTaskFetchByCondition,
    MidjourneyAction,
    MidjourneyModal,
    MidjourneyShorten,
    MidjourneySwapFace,
    MidjourneyUpload,
    MidjourneyVideo,
    MidjourneyEdits,

    AudioSpeech,
    AudioTranscription,
    AudioTranslation,

    SunoFetch,
    SunoFetchById,
    SunoSubmit,

    VideoFetchById,
    VideoSubmit,

    Rerank,
    Responses,
    Realtime,
    GeminiModels,
}

impl RelayMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::ChatCompletions => "chat_completions",
            Self::Completions => "completions",
            Self::Embeddings => "embeddings",
            Self::Moderations => "moderations",
            Self::ImagesGenerations => "images_generations",
            Self::ImagesEdits => "images_edits",
            Self::Edits => "edits",
            Self::MidjourneyImagine => "mj_imagine",
            Self::MidjourneyDescribe => "mj_describe",
            Self::MidjourneyBlend => "mj_blend",
            Self::MidjourneyChange => "mj_change",
            Self::MidjourneyNotify => "mj_notify",
            Self::MidjourneyTaskFetch => "mj_task_fetch",
            Self::MidjourneyTaskImageSeed => "mj_task_image_seed",
            Self::MidjourneyTaskFetchByCondition => "mj_task_fetch_by_condition",
            Self::MidjourneyAction => "mj_action",
            Self::MidjourneyModal => "mj_modal",
            Self::MidjourneyShorten => "mj_shorten",
            Self::MidjourneySwapFace => "mj_swap_face",
            Self::MidjourneyUpload => "mj_upload",
            Self::MidjourneyVideo => "mj_video",
            Self::MidjourneyEdits => "mj_edits",
            Self::AudioSpeech => "audio_speech",
            Self::AudioTranscription => "audio_transcription",
            Self::AudioTranslation => "audio_translation",
            Self::SunoFetch => "suno_fetch",
            Self::SunoFetchById => "suno_fetch_by_id",
            Self::SunoSubmit => "suno_submit",
            Self::VideoFetchById => "video_fetch_by_id",
            Self::VideoSubmit => "video_submit",
            Self::Rerank => "rerank",
            Self::Responses => "responses",
            Self::Realtime => "realtime",
            Self::GeminiModels => "gemini_models",
        }
    }

    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub const fn is_midjourney(self) -> bool {
        matches!(
            self,
            Self::MidjourneyImagine
                | Self::MidjourneyDescribe
                | Self::MidjourneyBlend
                | Self::MidjourneyChange
                | Self::MidjourneyNotify
                | Self::MidjourneyTaskFetch
                | Self::MidjourneyTaskImageSeed
                | Self::MidjourneyTaskFetchByCondition
                | Self::MidjourneyAction
                | Self::MidjourneyModal
                | Self::MidjourneyShorten
                | Self::MidjourneySwapFace
                | Self::MidjourneyUpload
                | Self::MidjourneyVideo
                | Self::MidjourneyEdits
        )
    }

    /// Classify a normalized path (see [`relay_mode_from_path`]).
    pub fn from_path(path: &str) -> Self {
        relay_mode_from_path(path)
    }
}

impl fmt::Display for RelayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single path predicate in a classification table.
#[derive(Debug, Clone, Copy)]
enum PathRule {
    /// Matches when the path starts with any of the listed prefixes.
    Prefix(&'static [&'static str]),
    /// Matches when the path ends with the given suffix.
    Suffix(&'static str),
}

impl PathRule {
    fn matches(self, path: &str) -> bool {
        match self {
            PathRule::Prefix(prefixes) => prefixes.iter().any(|p| path.starts_with(p)),
            PathRule::Suffix(suffix) => path.ends_with(suffix),
        }
    }
}

/// Main classification chain. Every rule accepts both the `/v1` and the bare
/// form of its path.
const RELAY_MODE_RULES: &[(PathRule, RelayMode)] = &[
    (
        PathRule::Prefix(&[
            "/v1/chat/completions",
            "/chat/completions",
            "/pg/chat/completions",
        ]),
        RelayMode::ChatCompletions,
    ),
    (
        PathRule::Prefix(&["/v1/completions", "/completions"]),
        RelayMode::Completions,
    ),
    (
        PathRule::Prefix(&["/v1/embeddings", "/embeddings"]),
        RelayMode::Embeddings,
    ),
    // Providers exposing embeddings under nonstandard prefixes
    (PathRule::Suffix("embeddings"), RelayMode::Embeddings),
    (
        PathRule::Prefix(&["/v1/moderations", "/moderations"]),
        RelayMode::Moderations,
    ),
    (
        PathRule::Prefix(&["/v1/images/generations", "/images/generations"]),
        RelayMode::ImagesGenerations,
    ),
    (
        PathRule::Prefix(&["/v1/images/edits", "/images/edits"]),
        RelayMode::ImagesEdits,
    ),
    (PathRule::Prefix(&["/v1/edits", "/edits"]), RelayMode::Edits),
    (
        PathRule::Prefix(&["/v1/responses", "/responses"]),
        RelayMode::Responses,
    ),
    (
        PathRule::Prefix(&["/v1/audio/speech", "/audio/speech"]),
        RelayMode::AudioSpeech,
    ),
    (
        PathRule::Prefix(&["/v1/audio/transcriptions", "/audio/transcriptions"]),
        RelayMode::AudioTranscription,
    ),
    (
        PathRule::Prefix(&["/v1/audio/translations", "/audio/translations"]),
        RelayMode::AudioTranslation,
    ),
    (PathRule::Prefix(&["/v1/rerank", "/rerank"]), RelayMode::Rerank),
    (
        PathRule::Prefix(&["/v1/realtime", "/realtime"]),
        RelayMode::Realtime,
    ),
    (
        PathRule::Prefix(&["/v1beta/models", "/v1/models", "/models"]),
        RelayMode::GeminiModels,
    ),
];

const MIDJOURNEY_PREFIX: &str = "/mj";

/// Midjourney actions keyed by path suffix. `change` and `simple-change`
/// collapse into one mode.
const MIDJOURNEY_RULES: &[(&str, RelayMode)] = &[
    // midjourney plus
    ("/mj/submit/action", RelayMode::MidjourneyAction),
    ("/mj/submit/modal", RelayMode::MidjourneyModal),
    ("/mj/submit/shorten", RelayMode::MidjourneyShorten),
    ("/mj/insight-face/swap", RelayMode::MidjourneySwapFace),
    ("/submit/upload-discord-images", RelayMode::MidjourneyUpload),
    // midjourney
    ("/mj/submit/imagine", RelayMode::MidjourneyImagine),
    ("/mj/submit/video", RelayMode::MidjourneyVideo),
    ("/mj/submit/edits", RelayMode::MidjourneyEdits),
    ("/mj/submit/blend", RelayMode::MidjourneyBlend),
    ("/mj/submit/describe", RelayMode::MidjourneyDescribe),
    ("/mj/notify", RelayMode::MidjourneyNotify),
    ("/mj/submit/change", RelayMode::MidjourneyChange),
    ("/mj/submit/simple-change", RelayMode::MidjourneyChange),
    ("/fetch", RelayMode::MidjourneyTaskFetch),
    ("/image-seed", RelayMode::MidjourneyTaskImageSeed),
    ("/list-by-condition", RelayMode::MidjourneyTaskFetchByCondition),
];

/// Video task routes; the method decides between submit and fetch.
const VIDEO_ROUTE_PREFIXES: &[&str] = &[
    "/v1/video/generations",
    "/v1/videos",
    "/kling/v1/videos",
    "/jimeng",
];

/// Classify a normalized path into a relay mode.
///
/// Returns [`RelayMode::Unknown`] when no rule matches; callers treat that as
/// "route not found".
pub fn relay_mode_from_path(path: &str) -> RelayMode {
    if let Some((_, mode)) = RELAY_MODE_RULES
        .iter()
        .find(|(rule, _)| rule.matches(path))
    {
        return *mode;
    }

    if path.starts_with(MIDJOURNEY_PREFIX) {
        return midjourney_relay_mode(path);
    }

    RelayMode::Unknown
}

/// Classify a Midjourney path by its suffix.
pub fn midjourney_relay_mode(path: &str) -> RelayMode {
    MIDJOURNEY_RULES
        .iter()
        .find(|(suffix, _)| path.ends_with(suffix))
        .map_or(RelayMode::Unknown, |(_, mode)| *mode)
}

/// Classify a Suno path; depends on the HTTP method.
pub fn suno_relay_mode(method: &Method, path: &str) -> RelayMode {
    if *method == Method::POST && path.ends_with("/fetch") {
        RelayMode::SunoFetch
    } else if *method == Method::GET && path.contains("/fetch/") {
        RelayMode::SunoFetchById
    } else if path.contains("/submit/") {
        RelayMode::SunoSubmit
    } else {
        RelayMode::Unknown
    }
}

/// Whether `path` lives under one of the video task route prefixes.
pub fn is_video_path(path: &str) -> bool {
    video_route_rest(path).is_some()
}

fn video_route_rest(path: &str) -> Option<&str> {
    VIDEO_ROUTE_PREFIXES.iter().find_map(|prefix| {
        let rest = path.strip_prefix(prefix)?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    })
}

/// Classify a video task path.
///
/// `POST` submits a generation; `GET` with a trailing id segment fetches one.
pub fn video_relay_mode(method: &Method, path: &str) -> RelayMode {
    let Some(rest) = video_route_rest(path) else {
        return RelayMode::Unknown;
    };

    if *method == Method::POST {
        RelayMode::VideoSubmit
    } else if *method == Method::GET && !rest.trim_matches('/').is_empty() {
        RelayMode::VideoFetchById
    } else {
        RelayMode::Unknown
    }
}
