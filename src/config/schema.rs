//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Monitored endpoints, one watcher each.
    pub items: Vec<TargetConfig>,

    /// Bearer token for the chat API.
    pub slack_token: String,

    /// Channel that receives alerts.
    pub slack_channel: String,

    /// Display name used when posting alerts.
    pub bot_name: String,

    /// Notification delivery settings.
    pub notifier: NotifierConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A single monitored HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Human-readable label used in alerts and logs.
    #[serde(default)]
    pub name: String,

    /// URL probed with a GET request.
    pub url: String,

    /// Status codes that count as a healthy response.
    pub ok_statuses: Vec<u16>,

    /// Delay between two probes in milliseconds.
    pub check_interval_ms: u64,

    /// Per-probe HTTP timeout in milliseconds.
    pub http_timeout_ms: u64,

    /// Consecutive healthy probes required to confirm OK.
    pub ok_periods: usize,

    /// Consecutive failed probes required to confirm ALARM.
    pub alarm_periods: usize,
}

impl TargetConfig {
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    /// Length of the rolling history window.
    pub fn window_len(&self) -> usize {
        self.ok_periods.max(self.alarm_periods)
    }

    /// Label for logs and metrics: the name, or the url when unnamed.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.url
        } else {
            &self.name
        }
    }
}

/// Chat API delivery settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Base URL of the chat web API.
    pub api_url: String,

    /// Delivery request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Capacity of the event queue between watchers and the notifier.
    pub queue_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            api_url: "https://slack.com/api".to_string(),
            timeout_ms: 10_000,
            queue_capacity: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
