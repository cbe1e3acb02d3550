//! Metrics collection and exposition.
//!
//! # Metrics
//! - `watchdog_heartbeats_total` (counter): valid heartbeats received
//! - `watchdog_ignored_payloads_total` (counter): payloads that were not a heartbeat
//! - `watchdog_deadline_remaining_seconds` (gauge): time left before the notice,
//!   refreshed on every reset and periodically while polling
//! - `watchdog_timeouts_total` (counter): timeout notices sent, by delivery
//! - `watchdog_sessions_failed_total` (counter): sessions ended by an I/O error
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Duration;

use ::metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::monitor::NoticeDelivery;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

pub fn record_heartbeat() {
    counter!("watchdog_heartbeats_total").increment(1);
}

pub fn record_deadline_remaining(remaining: Duration) {
    gauge!("watchdog_deadline_remaining_seconds").set(remaining.as_secs_f64());
}

pub fn record_ignored_payload() {
    counter!("watchdog_ignored_payloads_total").increment(1);
}

pub fn record_timeout(delivery: NoticeDelivery) {
    let delivery = match delivery {
        NoticeDelivery::Complete => "complete",
        NoticeDelivery::PeerClosed => "peer_closed",
        NoticeDelivery::Short { .. } => "short",
    };
    counter!("watchdog_timeouts_total", "delivery" => delivery).increment(1);
}

pub fn record_failure() {
    counter!("watchdog_sessions_failed_total").increment(1);
}
