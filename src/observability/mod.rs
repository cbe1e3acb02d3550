//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Acceptor and monitor produce:
//!     → logging.rs (structured log events, session span)
//!     → metrics.rs (heartbeat/timeout counters)
//!
//! Consumers:
//!     → stdout (human-readable progress)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
