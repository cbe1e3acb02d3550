//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the optional metrics endpoint
//! - Bind the listener and accept the single session
//! - Run the liveness monitor and release both handles afterwards
//!
//! # Design Decisions
//! - Fail fast: any setup error is fatal
//! - The listener outlives the monitor but is never accepted on again

use tracing::Instrument;

use crate::config::{MonitorConfig, WatchdogConfig};
use crate::error::{Result, EXIT_MONITOR};
use crate::monitor::{LivenessMonitor, RunReport};
use crate::net::{acquire_single_connection, Listener};
use crate::observability::metrics;

/// Run one watchdog session with the given configuration.
pub async fn run(config: &WatchdogConfig) -> Result<RunReport> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = Listener::bind(&config.listener)?;
    serve(listener, &config.monitor).await
}

/// Accept the single session on `listener` and monitor it to completion.
pub async fn serve(listener: Listener, config: &MonitorConfig) -> Result<RunReport> {
    let connection = acquire_single_connection(&listener, config).await?;
    let peer_addr = connection.peer_addr();

    let monitor = LivenessMonitor::new(connection, Some(peer_addr), config);
    let session = monitor.session();
    let span = tracing::info_span!(
        "session",
        session_id = %session.id(),
        peer_addr = tracing::field::Empty
    );
    if let Some(addr) = session.peer_addr() {
        span.record("peer_addr", tracing::field::display(addr));
    }

    let result = monitor.run().instrument(span).await;

    drop(listener);
    tracing::debug!("Listener closed");

    Ok(result?)
}

/// Process exit status for a finished run.
///
/// A delivered timeout notice is the expected ending and still exits non-zero.
pub fn exit_code(result: &Result<RunReport>) -> u8 {
    match result {
        Ok(_) => EXIT_MONITOR,
        Err(e) => e.exit_code(),
    }
}
