//! itsalive: HTTP endpoint monitor with debounced chat alerts.
//!
//! # Architecture Overview
//!
//! ```text
//!   itsalive.toml ──▶ config (load + validate) ──▶ lifecycle::launch
//!                                                        │
//!            ┌──────────────────────┬────────────────────┤
//!            ▼                      ▼                    ▼
//!     ┌─────────────┐        ┌─────────────┐      ┌─────────────┐
//!     │  watcher A  │        │  watcher B  │ ...  │  notifier   │──▶ Slack
//!     │ probe/eval  │        │ probe/eval  │      │ (one sink)  │
//!     └──────┬──────┘        └──────┬──────┘      └──────▲──────┘
//!            │   StatusChangeEvent  │                    │
//!            └──────────────────────┴──▶ event queue ────┘
//!                                        (bounded, FIFO)
//! ```
//!
//! Any failed or panicked task stops the whole process with a non-zero
//! exit status; SIGINT/SIGTERM stop it cleanly.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use itsalive::config::loader::{load_config, resolve_path};
use itsalive::health::HttpProber;
use itsalive::lifecycle::{self, signals, Shutdown};
use itsalive::notify::SlackSink;
use itsalive::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "itsalive")]
#[command(about = "Watch HTTP endpoints and post debounced state changes to Slack", long_about = None)]
struct Cli {
    /// Config file (defaults to $ITSALIVE_CONFIG, then ./itsalive.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let path = resolve_path(cli.config);

    let config = match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}: {}", path.display(), e);
            return ExitCode::from(2);
        }
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    if let Err(e) = logging::parse_level(level) {
        eprintln!("error: {}", e);
        return ExitCode::from(2);
    }

    if cli.check {
        println!("{}: ok ({} targets)", path.display(), config.items.len());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = logging::init(level, config.observability.log_format) {
        eprintln!("error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!(
        config = %path.display(),
        targets = config.items.len(),
        channel = %config.slack_channel,
        "itsalive v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                    return ExitCode::FAILURE;
                }
            }
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
                return ExitCode::FAILURE;
            }
        }
    }

    let prober = match HttpProber::new() {
        Ok(prober) => prober,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };
    let sink = match SlackSink::from_config(&config) {
        Ok(sink) => sink,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build Slack client");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let supervisor = match lifecycle::launch(&config, prober, sink, &shutdown) {
        Ok(supervisor) => supervisor,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    match supervisor.wait().await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error, exiting");
            ExitCode::FAILURE
        }
    }
}
