//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Watcher loop (watcher.rs), one task per target:
//!     Sleep for the check interval
//!     → Probe the target (probe.rs)
//!     → Classify as Ok / Alarm
//!     → Push into the rolling window (history.rs)
//!     → Evaluate the confirmed state (state.rs)
//!     → On a confirmed change, enqueue a StatusChangeEvent
//! ```
//!
//! # Design Decisions
//! - State transitions require consecutive identical outcomes
//! - Health state is per-target and owned by exactly one task, so no locking
//! - Probe failures are data, not errors: they become Alarm samples

pub mod history;
pub mod probe;
pub mod state;
pub mod watcher;

pub use history::HealthHistory;
pub use probe::{HttpProber, ProbeResult, Prober};
pub use state::{evaluate, ConfirmedState, RawOutcome};
pub use watcher::{TargetWatcher, WatchError};
