//! Logging setup and request identifiers.
//!
//! The filter defaults to `info,llm_relay_core=debug` and is overridden by
//! `RUST_LOG`. Timestamps use the local timezone (respects `TZ`).

use crate::core::config::{LogConfig, LogFormat};
use chrono::Local;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Custom time formatter that uses local timezone
struct LocalTime;

impl tracing_subscriber::fmt::time::FormatTime for LocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S"))
    }
}

fn build_filter() -> EnvFilter {
    let base_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,llm_relay_core=debug".to_string());

    // Always suppress noisy HTTP library logs regardless of RUST_LOG setting
    EnvFilter::new(format!("{},hyper=warn,h2=warn", base_filter))
}

/// Install the global tracing subscriber.
///
/// Returns `false` when a subscriber was already installed (for example by
/// the embedding server), in which case nothing changes.
pub fn init_tracing(config: &LogConfig) -> bool {
    let filter = build_filter();

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_timer(LocalTime)
                    .with_ansi(false),
            )
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_timer(LocalTime)
                    .with_ansi(!config.no_color),
            )
            .try_init(),
    };

    result.is_ok()
}

/// Generate a new unique request ID using UUID v4.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
