//! Heartbeat Watchdog
//!
//! Accepts a single TCP peer, expects `ICMP-RESPONSE-RECEIVED` heartbeats,
//! and sends `TIMEOUT\0` once a full window passes without one.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────┐
//!                  │                  HEARTBEAT WATCHDOG                   │
//!                  │                                                       │
//!   Peer connect   │  ┌──────────┐    ┌──────────┐    ┌────────────────┐  │
//!   ───────────────┼─▶│   net    │───▶│ acceptor │───▶│    monitor     │  │
//!                  │  │ listener │    │ handshake│    │ liveness loop  │  │
//!                  │  └──────────┘    └──────────┘    └───────┬────────┘  │
//!                  │                                          │           │
//!   TIMEOUT\0      │                                          ▼           │
//!   ◀──────────────┼──────────────────────────────── notice / close      │
//!                  │                                                       │
//!                  │  ┌─────────┐ ┌──────────────┐ ┌───────────┐          │
//!                  │  │ config  │ │observability │ │ lifecycle │          │
//!                  │  └─────────┘ └──────────────┘ └───────────┘          │
//!                  └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Exit Codes
//! - `1`: timeout notice sent, or the session failed while monitoring
//! - `2`: configuration or socket setup failure

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use heartbeat_watchdog::config::{self, ObservabilityConfig, Overrides};
use heartbeat_watchdog::error::WatchdogError;
use heartbeat_watchdog::lifecycle;
use heartbeat_watchdog::observability::logging;

#[derive(Parser)]
#[command(name = "heartbeat-watchdog")]
#[command(about = "Single-connection TCP heartbeat watchdog", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,

    /// Pause between receives in milliseconds; 0 busy-polls.
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            port: self.port,
            poll_interval_ms: self.poll_interval_ms,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::resolve_config(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&ObservabilityConfig::default());
            let err = WatchdogError::from(e);
            tracing::error!(error = %err, "Failed to load configuration");
            return ExitCode::from(err.exit_code());
        }
    };

    logging::init(&config.observability);

    tracing::info!(
        port = config.listener.port,
        window_ms = config.monitor.window_ms,
        poll_interval_ms = config.monitor.poll_interval_ms,
        "heartbeat-watchdog v0.1.0 starting"
    );

    let result = lifecycle::run(&config).await;
    match &result {
        Ok(report) => tracing::info!(
            session_id = %report.session_id,
            state = %report.state,
            heartbeats = report.heartbeats,
            ignored_payloads = report.ignored_payloads,
            delivery = ?report.delivery,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Session ended"
        ),
        Err(e) => tracing::error!(error = %e, "Watchdog terminated"),
    }

    ExitCode::from(lifecycle::exit_code(&result))
}
