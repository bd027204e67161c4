//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → event queue → notifier → one watcher per target
//!
//! Supervision (supervisor.rs):
//!     Any task fails or panics → abort all tasks → non-zero exit
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → watchers stop → notifier drains queue → exit 0
//! ```
//!
//! # Design Decisions
//! - All-or-nothing availability: a dead watcher or notifier stops the process
//! - Restarting is left to an external supervisor (systemd, k8s, ...)

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod supervisor;

pub use shutdown::Shutdown;
pub use startup::launch;
pub use supervisor::{FatalError, Supervisor, TaskError};
