//! Metrics collection and exposition.
//!
//! # Metrics
//! - `itsalive_probes_total` (counter): probes by target, outcome
//! - `itsalive_transitions_total` (counter): confirmed changes by target, new state
//! - `itsalive_target_state` (gauge): 0=unknown, 1=ok, 2=alarm
//! - `itsalive_notifications_total` (counter): deliveries by result

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::state::{ConfirmedState, RawOutcome};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe(target: &str, outcome: RawOutcome) {
    ::metrics::counter!(
        "itsalive_probes_total",
        "target" => target.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

pub fn record_transition(target: &str, to: ConfirmedState) {
    ::metrics::counter!(
        "itsalive_transitions_total",
        "target" => target.to_string(),
        "to" => to.as_str()
    )
    .increment(1);
    record_state(target, to);
}

/// Publish the current confirmed state of a target.
pub fn record_state(target: &str, state: ConfirmedState) {
    ::metrics::gauge!("itsalive_target_state", "target" => target.to_string())
        .set(f64::from(state as u8));
}

pub fn record_notification(delivered: bool) {
    let result = if delivered { "delivered" } else { "failed" };
    ::metrics::counter!("itsalive_notifications_total", "result" => result).increment(1);
}
