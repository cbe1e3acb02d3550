//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the watchdog.
//! All types derive Serde traits for deserialization from config files.
//! Every default reproduces the fixed protocol constants, so an empty file
//! (or no file at all) yields the reference behaviour.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the watchdog.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Listener configuration (bind address, port, backlog).
    pub listener: ListenerConfig,

    /// Liveness monitor timing.
    pub monitor: MonitorConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// IPv4 bind address (wildcard by default).
    pub bind_address: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum pending connections queued by the kernel.
    pub backlog: u32,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            backlog: 3,
        }
    }
}

/// Liveness monitor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Heartbeat window in milliseconds. Expiry triggers the timeout notice.
    pub window_ms: u64,

    /// Delay between accept and the handshake receive, in milliseconds.
    pub grace_ms: u64,

    /// Pause between non-blocking receives in milliseconds (0 = busy poll).
    pub poll_interval_ms: u64,

    /// Receive buffer size in bytes.
    pub buffer_size: usize,
}

impl MonitorConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_ms: 10_000,
            grace_ms: 1_000,
            poll_interval_ms: 0,
            buffer_size: 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "heartbeat_watchdog=info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = WatchdogConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0");
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.listener.backlog, 3);
        assert_eq!(config.monitor.window(), Duration::from_secs(10));
        assert_eq!(config.monitor.grace(), Duration::from_secs(1));
        assert_eq!(config.monitor.poll_interval(), Duration::ZERO);
        assert_eq!(config.monitor.buffer_size, 1024);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: WatchdogConfig = toml::from_str(
            r#"
            [listener]
            port = 4000

            [monitor]
            poll_interval_ms = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 4000);
        assert_eq!(config.listener.bind_address, "0.0.0.0");
        assert_eq!(config.monitor.poll_interval_ms, 5);
        assert_eq!(config.monitor.window_ms, 10_000);
    }
}
