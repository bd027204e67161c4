//! Bounded multi-producer, single-consumer event queue.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::events::types::StatusChangeEvent;

/// Queue capacity used unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 100;

/// The consumer side has gone away.
#[derive(Debug, Error)]
#[error("event queue closed")]
pub struct QueueClosed(pub StatusChangeEvent);

/// Producer handle, cloned into every watcher.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<StatusChangeEvent>,
}

/// Consumer handle, owned by the notifier.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::Receiver<StatusChangeEvent>,
}

/// Create a queue holding at most `capacity` pending events.
///
/// # Panics
/// Panics if `capacity` is zero.
pub fn event_queue(capacity: usize) -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender { tx }, EventReceiver { rx })
}

impl EventSender {
    /// Enqueue an event, waiting while the queue is full.
    pub async fn enqueue(&self, event: StatusChangeEvent) -> Result<(), QueueClosed> {
        self.tx.send(event).await.map_err(|e| QueueClosed(e.0))
    }
}

impl EventReceiver {
    /// Wait for the next event; `None` once every sender is dropped and the
    /// queue is drained.
    pub async fn dequeue(&mut self) -> Option<StatusChangeEvent> {
        self.rx.recv().await
    }
}
