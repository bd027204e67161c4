//! Target health state machine.
//!
//! # States
//! - Unknown: not enough consecutive agreement yet
//! - Ok: the last `ok_periods` probes all succeeded
//! - Alarm: the last `alarm_periods` probes all failed
//!
//! # State Transitions
//! ```text
//! * → Ok:    last ok_periods samples are Ok
//! * → Alarm: last alarm_periods samples are Alarm
//! otherwise: Unknown (no confirmed change)
//! ```
//!
//! # Design Decisions
//! - Hysteresis prevents flapping
//! - Evaluation is a pure function of the history window
//! - Unclassified warm-up samples never satisfy either run

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::health::history::{HealthHistory, Sample};

/// Classification of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawOutcome {
    Ok,
    Alarm,
}

impl RawOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RawOutcome::Ok => "ok",
            RawOutcome::Alarm => "alarm",
        }
    }
}

/// Debounced health state of a target.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmedState {
    #[default]
    Unknown = 0,
    Ok = 1,
    Alarm = 2,
}

impl ConfirmedState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmedState::Unknown => "unknown",
            ConfirmedState::Ok => "ok",
            ConfirmedState::Alarm => "alarm",
        }
    }
}

impl fmt::Display for ConfirmedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the confirmed state from the newest entries of the window.
///
/// A run longer than the window can never be observed, so it yields
/// `Unknown` rather than reading past the buffer.
pub fn evaluate(history: &HealthHistory, ok_periods: usize, alarm_periods: usize) -> ConfirmedState {
    match history.latest() {
        Sample::Outcome(RawOutcome::Ok) if run_of(history, RawOutcome::Ok, ok_periods) => {
            ConfirmedState::Ok
        }
        Sample::Outcome(RawOutcome::Alarm)
            if run_of(history, RawOutcome::Alarm, alarm_periods) =>
        {
            ConfirmedState::Alarm
        }
        _ => ConfirmedState::Unknown,
    }
}

fn run_of(history: &HealthHistory, outcome: RawOutcome, periods: usize) -> bool {
    if periods == 0 || periods > history.capacity() {
        return false;
    }
    history
        .newest_first()
        .take(periods)
        .all(|sample| sample == Sample::Outcome(outcome))
}

/// Decides whether a freshly evaluated state is worth reporting.
///
/// Holds the last confirmed state; only genuine changes to `Ok` or `Alarm`
/// are returned, and `Unknown` never replaces a confirmed state.
#[derive(Debug, Default)]
pub struct Transition {
    last: ConfirmedState,
}

impl Transition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> ConfirmedState {
        self.last
    }

    /// Returns `(from, to)` when `next` is a reportable change.
    pub fn observe(&mut self, next: ConfirmedState) -> Option<(ConfirmedState, ConfirmedState)> {
        if next == ConfirmedState::Unknown || next == self.last {
            return None;
        }
        let from = std::mem::replace(&mut self.last, next);
        Some((from, next))
    }
}
