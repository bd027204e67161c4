//! Startup orchestration.
//!
//! # Responsibilities
//! - Create the event queue
//! - Start the notifier, then one watcher per target
//! - Hand every task to the supervisor
//!
//! # Design Decisions
//! - Fail fast: the config must already be validated, any startup error is fatal
//! - The notifier starts first so no event waits on a missing consumer

use crate::config::AppConfig;
use crate::events::event_queue;
use crate::health::{Prober, TargetWatcher, WatchError};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::supervisor::Supervisor;
use crate::notify::{run_notifier, Sink};

/// Spawn the notifier and all watchers.
///
/// Watchers leave their loop when `shutdown` fires; the notifier then drains
/// the queue and finishes once the last watcher is gone.
pub fn launch<P, S>(
    config: &AppConfig,
    prober: P,
    sink: S,
    shutdown: &Shutdown,
) -> Result<Supervisor, WatchError>
where
    P: Prober + Clone + 'static,
    S: Sink + 'static,
{
    let watchers = config
        .items
        .iter()
        .map(|target| TargetWatcher::new(target.clone(), prober.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let (events, receiver) = event_queue(config.notifier.queue_capacity);
    let mut supervisor = Supervisor::new();

    supervisor.spawn("notifier", run_notifier(receiver, sink));

    for watcher in watchers {
        let name = format!("watcher:{}", watcher.config().label());
        supervisor.spawn(name, watcher.run(events.clone(), shutdown.subscribe()));
    }

    tracing::info!(
        targets = config.items.len(),
        queue_capacity = config.notifier.queue_capacity,
        "All watchers started"
    );

    Ok(supervisor)
}
