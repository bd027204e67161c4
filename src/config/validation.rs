//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check global notification fields and the log level
//! - Validate value ranges per target (timeouts > 0, periods >= 1)
//!
//! # Design Decisions
//! - Returns the first violation per target, tagged with the target index
//! - Validation is pure function: AppConfig → Result<(), ValidationError>
//! - Runs once before any watcher is started

use thiserror::Error;
use url::Url;

use crate::config::schema::{AppConfig, TargetConfig};
use crate::observability::logging::parse_level;

/// Problem with a single target definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("url is empty")]
    EmptyUrl,

    #[error("url '{url}' is invalid: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("ok_statuses is empty")]
    EmptyOkStatuses,

    #[error("ok_statuses contains {0}, not an HTTP status code")]
    InvalidStatus(u16),

    #[error("check_interval_ms must be greater than 0")]
    ZeroCheckInterval,

    #[error("http_timeout_ms must be greater than 0")]
    ZeroHttpTimeout,

    #[error("alarm_periods must be at least 1")]
    ZeroAlarmPeriods,

    #[error("ok_periods must be at least 1")]
    ZeroOkPeriods,
}

impl TargetError {
    /// Name of the offending configuration field.
    pub fn field(&self) -> &'static str {
        match self {
            TargetError::EmptyUrl | TargetError::InvalidUrl { .. } => "url",
            TargetError::EmptyOkStatuses | TargetError::InvalidStatus(_) => "ok_statuses",
            TargetError::ZeroCheckInterval => "check_interval_ms",
            TargetError::ZeroHttpTimeout => "http_timeout_ms",
            TargetError::ZeroAlarmPeriods => "alarm_periods",
            TargetError::ZeroOkPeriods => "ok_periods",
        }
    }
}

/// Reason a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("slack_token is empty")]
    EmptySlackToken,

    #[error("slack_channel is empty")]
    EmptySlackChannel,

    #[error("bot_name is empty")]
    EmptyBotName,

    #[error("no items configured")]
    NoItems,

    #[error("notifier.queue_capacity must be greater than 0")]
    ZeroQueueCapacity,

    #[error("observability.log_level '{0}' is not a log level")]
    InvalidLogLevel(String),

    #[error("invalid item {index}: {source}")]
    Target {
        index: usize,
        #[source]
        source: TargetError,
    },
}

/// Validate the whole configuration, stopping at the first problem.
pub fn validate_config(config: &AppConfig) -> Result<(), ValidationError> {
    if is_blank(&config.slack_token) {
        return Err(ValidationError::EmptySlackToken);
    }
    if is_blank(&config.slack_channel) {
        return Err(ValidationError::EmptySlackChannel);
    }
    if is_blank(&config.bot_name) {
        return Err(ValidationError::EmptyBotName);
    }
    if config.items.is_empty() {
        return Err(ValidationError::NoItems);
    }
    if config.notifier.queue_capacity == 0 {
        return Err(ValidationError::ZeroQueueCapacity);
    }
    if parse_level(&config.observability.log_level).is_err() {
        return Err(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    for (index, target) in config.items.iter().enumerate() {
        validate_target(target).map_err(|source| ValidationError::Target { index, source })?;
    }

    Ok(())
}

/// Validate a single target definition.
pub fn validate_target(target: &TargetConfig) -> Result<(), TargetError> {
    if is_blank(&target.url) {
        return Err(TargetError::EmptyUrl);
    }
    check_url(&target.url)?;

    if target.ok_statuses.is_empty() {
        return Err(TargetError::EmptyOkStatuses);
    }
    if let Some(&status) = target
        .ok_statuses
        .iter()
        .find(|status| !(100..=599).contains(*status))
    {
        return Err(TargetError::InvalidStatus(status));
    }

    if target.check_interval_ms == 0 {
        return Err(TargetError::ZeroCheckInterval);
    }
    if target.http_timeout_ms == 0 {
        return Err(TargetError::ZeroHttpTimeout);
    }
    if target.alarm_periods == 0 {
        return Err(TargetError::ZeroAlarmPeriods);
    }
    if target.ok_periods == 0 {
        return Err(TargetError::ZeroOkPeriods);
    }

    Ok(())
}

fn check_url(raw: &str) -> Result<(), TargetError> {
    let invalid = |reason: String| TargetError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> TargetConfig {
        TargetConfig {
            name: "api".into(),
            url: "http://127.0.0.1:8080/health".into(),
            ok_statuses: vec![200],
            check_interval_ms: 1000,
            http_timeout_ms: 500,
            ok_periods: 2,
            alarm_periods: 2,
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            items: vec![target(), target(), target()],
            slack_token: "xoxb-token".into(),
            slack_channel: "#alerts".into(),
            bot_name: "itsalive".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate_config(&config()), Ok(()));
    }

    #[test]
    fn test_global_fields_checked_first() {
        let mut cfg = config();
        cfg.slack_token = "  ".into();
        cfg.items.clear();
        assert_eq!(validate_config(&cfg), Err(ValidationError::EmptySlackToken));

        let mut cfg = config();
        cfg.slack_channel.clear();
        assert_eq!(validate_config(&cfg), Err(ValidationError::EmptySlackChannel));

        let mut cfg = config();
        cfg.bot_name.clear();
        assert_eq!(validate_config(&cfg), Err(ValidationError::EmptyBotName));
    }

    #[test]
    fn test_no_items() {
        let mut cfg = config();
        cfg.items.clear();
        assert_eq!(validate_config(&cfg), Err(ValidationError::NoItems));
    }

    #[test]
    fn test_zero_queue_capacity() {
        let mut cfg = config();
        cfg.notifier.queue_capacity = 0;
        assert_eq!(validate_config(&cfg), Err(ValidationError::ZeroQueueCapacity));
    }

    #[test]
    fn test_unparsable_log_level() {
        let mut cfg = config();
        cfg.observability.log_level = "verbose".into();
        assert_eq!(
            validate_config(&cfg),
            Err(ValidationError::InvalidLogLevel("verbose".into()))
        );

        cfg.observability.log_level = "debug".into();
        assert_eq!(validate_config(&cfg), Ok(()));
    }

    #[test]
    fn test_empty_statuses_reports_index() {
        let mut cfg = config();
        cfg.items[2].ok_statuses.clear();

        let err = validate_config(&cfg).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Target {
                index: 2,
                source: TargetError::EmptyOkStatuses,
            }
        );
        assert_eq!(err.to_string(), "invalid item 2: ok_statuses is empty");
        if let ValidationError::Target { source, .. } = err {
            assert_eq!(source.field(), "ok_statuses");
        }
    }

    #[test]
    fn test_first_failing_target_wins() {
        let mut cfg = config();
        cfg.items[1].http_timeout_ms = 0;
        cfg.items[2].url.clear();
        assert_eq!(
            validate_config(&cfg),
            Err(ValidationError::Target {
                index: 1,
                source: TargetError::ZeroHttpTimeout,
            })
        );
    }

    #[test]
    fn test_first_violation_within_target() {
        let mut t = target();
        t.ok_statuses.clear();
        t.check_interval_ms = 0;
        t.ok_periods = 0;
        assert_eq!(validate_target(&t), Err(TargetError::EmptyOkStatuses));
    }

    #[test]
    fn test_target_field_checks() {
        let mut t = target();
        t.url = String::new();
        assert_eq!(validate_target(&t), Err(TargetError::EmptyUrl));

        let mut t = target();
        t.check_interval_ms = 0;
        assert_eq!(validate_target(&t), Err(TargetError::ZeroCheckInterval));

        let mut t = target();
        t.alarm_periods = 0;
        assert_eq!(validate_target(&t), Err(TargetError::ZeroAlarmPeriods));

        let mut t = target();
        t.ok_periods = 0;
        assert_eq!(validate_target(&t), Err(TargetError::ZeroOkPeriods));

        let mut t = target();
        t.ok_statuses = vec![200, 42];
        assert_eq!(validate_target(&t), Err(TargetError::InvalidStatus(42)));
    }

    #[test]
    fn test_url_must_be_http() {
        let mut t = target();
        t.url = "ftp://example.com".into();
        assert!(matches!(validate_target(&t), Err(TargetError::InvalidUrl { .. })));

        t.url = "not a url".into();
        let err = validate_target(&t).unwrap_err();
        assert_eq!(err.field(), "url");
    }

    #[test]
    fn test_unnamed_target_is_allowed() {
        let mut t = target();
        t.name.clear();
        assert_eq!(validate_target(&t), Ok(()));
    }
}
