//! State-change events and the queue that carries them.
//!
//! # Data Flow
//! ```text
//! watcher (target A) ─┐
//! watcher (target B) ─┼─→ EventSender::enqueue ─→ bounded channel ─→ EventReceiver::dequeue ─→ notifier
//! watcher (target C) ─┘
//! ```
//!
//! # Design Decisions
//! - One bounded channel shared by every watcher
//! - A full queue blocks the sending watcher (backpressure, nothing is dropped)
//! - Delivery order is send order across all producers

pub mod queue;
pub mod types;

pub use queue::{event_queue, EventReceiver, EventSender, QueueClosed, DEFAULT_CAPACITY};
pub use types::StatusChangeEvent;
