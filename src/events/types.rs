//! Event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::health::state::ConfirmedState;

/// A confirmed change of a target's health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeEvent {
    /// Target name.
    pub name: String,
    /// Target URL.
    pub url: String,
    /// When the watcher observed the change.
    pub at: DateTime<Utc>,
    /// Previous confirmed state.
    pub from: ConfirmedState,
    /// New confirmed state, never `Unknown`.
    pub to: ConfirmedState,
}

impl StatusChangeEvent {
    pub fn new(name: &str, url: &str, from: ConfirmedState, to: ConfirmedState) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            at: Utc::now(),
            from,
            to,
        }
    }
}
