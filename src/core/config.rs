//! Configuration for the relay core.
//!
//! Values come from environment variables (a `.env` file is honoured). None
//! of them mutate the process-wide routing catalogs; they only feed the URL
//! composer, the axum glue and logging setup.

use crate::core::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Edge gateways that proxy several providers behind one base URL.
pub const DEFAULT_EDGE_GATEWAY_PREFIXES: &[&str] = &["https://gateway.ai.cloudflare.com"];

const DEFAULT_TASK_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Base-URL prefixes treated as multi-provider edge gateways
    #[serde(default = "default_edge_gateway_prefixes")]
    pub edge_gateway_prefixes: Vec<String>,

    /// Maximum accepted body size for task submissions
    #[serde(default = "default_task_max_body_bytes")]
    pub task_max_body_bytes: usize,

    #[serde(default)]
    pub log: LogConfig,
}

/// Log output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Disable ANSI colors (set when `NO_COLOR` is present)
    #[serde(default)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            edge_gateway_prefixes: default_edge_gateway_prefixes(),
            task_max_body_bytes: default_task_max_body_bytes(),
            log: LogConfig::default(),
        }
    }
}

fn default_edge_gateway_prefixes() -> Vec<String> {
    DEFAULT_EDGE_GATEWAY_PREFIXES
        .iter()
        .map(|prefix| prefix.to_string())
        .collect()
}

fn default_task_max_body_bytes() -> usize {
    DEFAULT_TASK_MAX_BODY_BYTES
}

impl RelayConfig {
    /// Build configuration from the environment.
    ///
    /// Recognised variables:
    /// - `EDGE_GATEWAY_PREFIXES`: comma-separated base-URL prefixes
    /// - `TASK_MAX_BODY_BYTES`: task submission body limit in bytes
    /// - `LOG_FORMAT`: `text` or `json`
    /// - `NO_COLOR`: disable ANSI colors when set
    ///
    /// Malformed values fail with [`AppError::Config`](crate::core::AppError::Config).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use llm_relay_core::core::config::RelayConfig;
    ///
    /// let config = RelayConfig::from_env().expect("invalid relay configuration");
    /// ```
    pub fn from_env() -> Result<Self> {
        #[cfg(not(test))]
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(prefixes) = std::env::var("EDGE_GATEWAY_PREFIXES") {
            let parsed = parse_prefix_list(&prefixes);
            if !parsed.is_empty() {
                config.edge_gateway_prefixes = parsed;
            }
        }

        if let Ok(limit) = std::env::var("TASK_MAX_BODY_BYTES") {
            config.task_max_body_bytes = limit
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid TASK_MAX_BODY_BYTES: {}", limit))?;
        }

        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.log.format = parse_log_format(&format)?;
        }

        config.log.no_color = std::env::var("NO_COLOR").is_ok();

        Ok(config)
    }
}

fn parse_prefix_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|v| v.trim().trim_end_matches('/'))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .collect()
}

fn parse_log_format(value: &str) -> anyhow::Result<LogFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "text" | "pretty" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(anyhow::anyhow!("Invalid LOG_FORMAT: {}", other)),
    }
}
