//! Single-connection heartbeat watchdog library.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod monitor;
pub mod net;
pub mod observability;

pub use config::WatchdogConfig;
pub use error::{MonitorError, SetupError, WatchdogError};
pub use monitor::{LivenessMonitor, RunReport};
