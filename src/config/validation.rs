//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (window > 0, backlog > 0, buffer fits the sentinel)
//! - Check addresses parse before any socket is opened
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatchdogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{Ipv4Addr, SocketAddr};

use crate::config::schema::WatchdogConfig;
use crate::monitor::heartbeat::HEARTBEAT_SENTINEL;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not an IPv4 address")]
    BindAddress(String),

    #[error("listener.backlog must be greater than zero")]
    Backlog,

    #[error("monitor.window_ms must be greater than zero")]
    Window,

    #[error("monitor.buffer_size {actual} is smaller than the heartbeat sentinel ({required} bytes)")]
    BufferSize { actual: usize, required: usize },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a configuration, collecting every violation.
pub fn validate_config(config: &WatchdogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<Ipv4Addr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.backlog == 0 {
        errors.push(ValidationError::Backlog);
    }

    if config.monitor.window_ms == 0 {
        errors.push(ValidationError::Window);
    }

    if config.monitor.buffer_size < HEARTBEAT_SENTINEL.len() {
        errors.push(ValidationError::BufferSize {
            actual: config.monitor.buffer_size,
            required: HEARTBEAT_SENTINEL.len(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
