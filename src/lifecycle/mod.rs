//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Metrics (optional) → Bind → Accept once → Handshake → Monitor → Close
//! ```
//!
//! # Design Decisions
//! - Single-shot: one session, then the process exits
//! - No signal handling; the session ends only by timeout or I/O failure

pub mod startup;

pub use startup::{exit_code, run, serve};
