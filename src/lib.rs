//! HTTP endpoint monitor library.
//!
//! Probes targets on their own cadence, debounces raw outcomes into a
//! confirmed state per target, and funnels confirmed changes through one
//! ordered queue to a notification sink.

pub mod config;
pub mod events;
pub mod health;
pub mod lifecycle;
pub mod notify;
pub mod observability;

pub use config::AppConfig;
pub use events::StatusChangeEvent;
pub use health::{ConfirmedState, RawOutcome};
pub use lifecycle::{launch, FatalError, Shutdown, Supervisor};
