//! Sink abstraction and the notifier loop.

use std::future::Future;

use thiserror::Error;

use crate::events::{EventReceiver, StatusChangeEvent};
use crate::observability::metrics;

/// Delivery failed and cannot be recovered.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat API returned status {0}")]
    Status(u16),

    #[error("chat API rejected message: {0}")]
    Rejected(String),
}

/// Consumer of state-change events.
pub trait Sink: Send + Sync {
    fn deliver(&self, event: &StatusChangeEvent) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Drain the queue in order until every producer is gone.
///
/// Stops at the first delivery failure and returns it.
pub async fn run_notifier<S: Sink>(mut events: EventReceiver, sink: S) -> Result<(), SinkError> {
    tracing::info!("Notifier starting");

    while let Some(event) = events.dequeue().await {
        tracing::info!(
            target_name = %event.name,
            url = %event.url,
            from = %event.from,
            to = %event.to,
            at = %event.at,
            "Delivering status change"
        );

        if let Err(e) = sink.deliver(&event).await {
            metrics::record_notification(false);
            tracing::error!(target_name = %event.name, error = %e, "Notification delivery failed");
            return Err(e);
        }
        metrics::record_notification(true);
    }

    tracing::info!("Event queue closed, notifier exiting");
    Ok(())
}
