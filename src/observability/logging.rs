//! Structured logging.
//!
//! # Responsibilities
//! - Provide a bootstrap subscriber for events emitted before config exists
//! - Install the process-wide subscriber from [`LoggingSettings`]
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, plain text for development
//! - The final log level comes from the config file only; `RUST_LOG` is
//!   honoured by the bootstrap subscriber alone

use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer, Registry};

use crate::config::LoggingSettings;

/// Filter used when the configured level is empty or invalid.
pub const DEFAULT_LEVEL: &str = "info";

/// Error returned when the global subscriber cannot be installed.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to install log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse a configured format; anything but "json" is text.
    pub fn from_setting(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Build the filter for a configured level.
///
/// Returns the filter and whether the configured value had to be replaced.
pub fn level_filter(level: &str) -> (EnvFilter, bool) {
    let level = level.trim();
    if level.is_empty() {
        return (EnvFilter::new(DEFAULT_LEVEL), false);
    }
    // A lone word must be a level; EnvFilter would read it as a target name.
    if !level.contains(|c| c == '=' || c == ',') && level.parse::<LevelFilter>().is_err() {
        return (EnvFilter::new(DEFAULT_LEVEL), true);
    }
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new(DEFAULT_LEVEL), true),
    }
}

/// Subscriber used while configuration is being resolved.
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
        )
        .with(fmt::layer())
}

/// Install the global subscriber described by `settings`.
pub fn init(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let (filter, replaced) = level_filter(&settings.level);
    let format = LogFormat::from_setting(&settings.format);

    let output: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Text => fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()?;

    if replaced {
        tracing::warn!(level = %settings.level, fallback = DEFAULT_LEVEL, "Invalid log level, using fallback");
    }
    tracing::debug!(?format, "Logging initialized");
    Ok(())
}
