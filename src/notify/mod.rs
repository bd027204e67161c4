//! Alert delivery subsystem.
//!
//! # Data Flow
//! ```text
//! EventReceiver::dequeue (sink.rs, run_notifier)
//!     → log the change
//!     → Sink::deliver
//!         → slack.rs: format message → POST chat.postMessage
//! ```
//!
//! # Design Decisions
//! - A single consumer preserves queue order
//! - A failed delivery is fatal: the notifier returns the error and the
//!   supervisor brings the whole process down

pub mod sink;
pub mod slack;

pub use sink::{run_notifier, Sink, SinkError};
pub use slack::SlackSink;
