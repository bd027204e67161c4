//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable by `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - An unparsable level is rejected instead of silently muting the crate

use thiserror::Error;
use tracing::level_filters::{LevelFilter, ParseLevelFilterError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level '{level}': {source}")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseLevelFilterError,
    },

    #[error("failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Parse a level name (`trace` .. `error`, or `off`).
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|source| LoggingError::InvalidLevel {
            level: level.to_string(),
            source,
        })
}

/// Build the filter: `RUST_LOG` when set, otherwise `level` for this crate.
pub fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("itsalive={},reqwest=warn", level)))
}

/// Install the global subscriber.
pub fn init(level: &str, format: LogFormat) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(env_filter(parse_level(level)?));

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_levels() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        let err = parse_level("verbose").unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_init_rejects_unknown_level_before_installing() {
        assert!(matches!(
            init("loud", LogFormat::Pretty),
            Err(LoggingError::InvalidLevel { .. })
        ));
    }
}
