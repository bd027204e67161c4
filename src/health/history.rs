//! Rolling window of recent probe outcomes for one target.

use std::collections::VecDeque;

use thiserror::Error;

use crate::health::state::RawOutcome;

/// One slot of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// Slot not yet filled by a real probe.
    Unclassified,
    Outcome(RawOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("history window must hold at least one sample")]
pub struct ZeroCapacity;

/// Fixed-size sliding window, oldest entry first.
///
/// Starts filled with [`Sample::Unclassified`] so that no run of real
/// outcomes can be seen before enough probes have actually happened.
#[derive(Debug, Clone)]
pub struct HealthHistory {
    samples: VecDeque<Sample>,
}

impl HealthHistory {
    pub fn new(capacity: usize) -> Result<Self, ZeroCapacity> {
        if capacity == 0 {
            return Err(ZeroCapacity);
        }
        Ok(Self {
            samples: std::iter::repeat(Sample::Unclassified).take(capacity).collect(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Append the newest outcome, dropping the oldest.
    pub fn push(&mut self, outcome: RawOutcome) {
        self.samples.pop_front();
        self.samples.push_back(Sample::Outcome(outcome));
    }

    pub fn latest(&self) -> Sample {
        self.samples
            .back()
            .copied()
            .unwrap_or(Sample::Unclassified)
    }

    pub fn newest_first(&self) -> impl Iterator<Item = Sample> + '_ {
        self.samples.iter().rev().copied()
    }
}
