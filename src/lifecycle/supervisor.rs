//! Task supervision and the process-wide abort path.
//!
//! # Design Decisions
//! - Every long-running task is spawned through one `Supervisor`
//! - The first task to fail or panic ends supervision with a `FatalError`;
//!   the remaining tasks are aborted and the caller exits non-zero
//! - A task finishing cleanly is only expected after shutdown

use std::future::Future;

use thiserror::Error;
use tokio::task::{JoinError, JoinSet};

use crate::health::WatchError;
use crate::notify::SinkError;

/// Error returned by a supervised task.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Watch(#[from] WatchError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Reason the process must stop.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("task '{task}' failed: {source}")]
    Task {
        task: String,
        #[source]
        source: TaskError,
    },

    #[error("supervised task panicked: {0}")]
    Panicked(#[source] JoinError),
}

type TaskOutput = (String, Result<(), TaskError>);

/// Owns every long-running task of the process.
#[derive(Default)]
pub struct Supervisor {
    tasks: JoinSet<TaskOutput>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a named task onto the runtime.
    pub fn spawn<F, E>(&mut self, name: impl Into<String>, task: F)
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Into<TaskError>,
    {
        let name = name.into();
        tracing::debug!(task = %name, "Spawning supervised task");
        self.tasks
            .spawn(async move { (name, task.await.map_err(Into::into)) });
    }

    /// Wait for all tasks. Returns on the first failure, aborting the rest.
    pub async fn wait(mut self) -> Result<(), FatalError> {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok((task, Ok(()))) => {
                    tracing::debug!(task = %task, "Supervised task finished");
                }
                Ok((task, Err(source))) => {
                    tracing::error!(task = %task, error = %source, "Supervised task failed, aborting");
                    self.tasks.abort_all();
                    return Err(FatalError::Task { task, source });
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    tracing::error!(error = %e, "Supervised task panicked, aborting");
                    self.tasks.abort_all();
                    return Err(FatalError::Panicked(e));
                }
            }
        }
        Ok(())
    }
}
