//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (resolve path, parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → one TargetConfig handed to each watcher
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload while running
//! - Global and per-target fields are checked before any watcher starts
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, LogFormat, NotifierConfig, ObservabilityConfig, TargetConfig};
pub use validation::{validate_config, TargetError, ValidationError};
