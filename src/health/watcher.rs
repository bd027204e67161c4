//! Per-target watcher task.
//!
//! # Responsibilities
//! - Probe one target on its own cadence
//! - Maintain the target's history window and confirmed state
//! - Emit an event on every confirmed change

use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time;

use crate::config::TargetConfig;
use crate::events::{EventSender, QueueClosed, StatusChangeEvent};
use crate::health::history::{HealthHistory, ZeroCapacity};
use crate::health::probe::{classify, ProbeResult, Prober};
use crate::health::state::{evaluate, ConfirmedState, Transition};
use crate::observability::metrics;

/// Unrecoverable watcher failure.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("target '{target}' has an empty history window: {source}")]
    EmptyWindow {
        target: String,
        #[source]
        source: ZeroCapacity,
    },

    #[error("target '{target}' lost the event queue: {source}")]
    QueueClosed {
        target: String,
        #[source]
        source: QueueClosed,
    },
}

/// Watches a single target. Owns all of that target's state.
pub struct TargetWatcher<P> {
    config: TargetConfig,
    prober: P,
    history: HealthHistory,
    transition: Transition,
}

impl<P: Prober> TargetWatcher<P> {
    pub fn new(config: TargetConfig, prober: P) -> Result<Self, WatchError> {
        let history = HealthHistory::new(config.window_len()).map_err(|source| {
            WatchError::EmptyWindow {
                target: config.label().to_string(),
                source,
            }
        })?;

        Ok(Self {
            config,
            prober,
            history,
            transition: Transition::new(),
        })
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    pub fn state(&self) -> ConfirmedState {
        self.transition.last()
    }

    pub fn history(&self) -> &HealthHistory {
        &self.history
    }

    /// Probe once and fold the result in. Returns the event to publish, if any.
    pub async fn step(&mut self) -> Option<StatusChangeEvent> {
        let result = self
            .prober
            .probe(&self.config.url, self.config.http_timeout())
            .await;
        let outcome = classify(&result, &self.config.ok_statuses);
        let target = self.config.label();

        match &result {
            ProbeResult::Status(code) => {
                tracing::debug!(target_name = %target, status = code, outcome = outcome.as_str(), "Probe completed");
            }
            ProbeResult::Failed(reason) => {
                tracing::debug!(target_name = %target, error = %reason, "Probe failed");
            }
        }
        metrics::record_probe(target, outcome);

        self.history.push(outcome);
        let next = evaluate(&self.history, self.config.ok_periods, self.config.alarm_periods);
        let (from, to) = self.transition.observe(next)?;

        match to {
            ConfirmedState::Alarm => {
                tracing::warn!(target_name = %target, url = %self.config.url, %from, %to, "Target state changed");
            }
            _ => {
                tracing::info!(target_name = %target, url = %self.config.url, %from, %to, "Target state changed");
            }
        }
        metrics::record_transition(target, to);

        Some(StatusChangeEvent::new(&self.config.name, &self.config.url, from, to))
    }

    /// Run until shutdown. Only a lost event queue ends the loop with an error.
    pub async fn run(
        mut self,
        events: EventSender,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), WatchError> {
        let interval = self.config.check_interval();
        tracing::info!(
            target_name = %self.config.label(),
            url = %self.config.url,
            interval_ms = interval.as_millis() as u64,
            "Watcher starting"
        );
        metrics::record_state(self.config.label(), self.state());

        loop {
            if let Some(event) = self.step().await {
                events
                    .enqueue(event)
                    .await
                    .map_err(|source| WatchError::QueueClosed {
                        target: self.config.label().to_string(),
                        source,
                    })?;
            }

            if wait_or_shutdown(interval, &mut shutdown).await {
                tracing::info!(target_name = %self.config.label(), "Watcher received shutdown signal, exiting loop");
                return Ok(());
            }
        }
    }
}

/// Sleep for `interval`; returns true if shutdown fired first.
async fn wait_or_shutdown(interval: Duration, shutdown: &mut broadcast::Receiver<()>) -> bool {
    tokio::select! {
        _ = time::sleep(interval) => false,
        _ = stop_requested(shutdown) => true,
    }
}

/// Resolves once shutdown is signalled. A dropped sender is not a signal.
async fn stop_requested(shutdown: &mut broadcast::Receiver<()>) {
    match shutdown.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending().await,
    }
}
