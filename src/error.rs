//! Error types for the watchdog.
//!
//! Setup errors abort the process before monitoring begins. Monitor errors
//! end the session in the `Failed` state. A short write of the timeout notice
//! is not an error at all; it is reported on the [`crate::monitor::NoticeDelivery`].

use thiserror::Error;

use crate::config::ConfigError;

/// Exit status for the timeout-notified path and every monitor failure.
pub const EXIT_MONITOR: u8 = 1;

/// Exit status for configuration and socket setup failures.
pub const EXIT_SETUP: u8 = 2;

/// Fatal errors raised before the liveness monitor starts.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("invalid bind address {address}: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),

    #[error("listen failed: {0}")]
    Listen(#[source] std::io::Error),

    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    #[error("handshake receive failed: {0}")]
    Handshake(#[source] std::io::Error),

    #[error("peer closed the connection before the handshake")]
    HandshakeClosed,
}

/// Fatal errors raised while monitoring the session.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("recv failed: {0}")]
    Recv(#[source] std::io::Error),

    #[error("peer closed the connection")]
    PeerClosed,

    #[error("send() failed: {0}")]
    Send(#[source] std::io::Error),
}

/// Top-level error for a watchdog run.
#[derive(Error, Debug)]
pub enum WatchdogError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("monitor error: {0}")]
    Monitor(#[from] MonitorError),
}

impl WatchdogError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            WatchdogError::Config(_) | WatchdogError::Setup(_) => EXIT_SETUP,
            WatchdogError::Monitor(_) => EXIT_MONITOR,
        }
    }
}

/// A specialized `Result` type for watchdog operations.
pub type Result<T> = std::result::Result<T, WatchdogError>;
