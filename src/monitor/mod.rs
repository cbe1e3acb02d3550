//! Liveness monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted connection
//!     → liveness.rs (poll loop, deadline resets, timeout notice)
//!     → heartbeat.rs (sentinel match, notice payload)
//!     → session.rs (deadline, last heartbeat, counters)
//!     → state.rs (Waiting → Notified | Failed)
//! ```
//!
//! # Design Decisions
//! - One session per process; the monitor owns it outright
//! - Heartbeat matching is exact byte equality on a single receive
//! - The notice is sent at most once; both terminal states are final

pub mod heartbeat;
pub mod liveness;
pub mod session;
pub mod state;

pub use heartbeat::{is_heartbeat, HEARTBEAT_SENTINEL, TIMEOUT_NOTICE};
pub use liveness::{LivenessMonitor, RunReport};
pub use session::Session;
pub use state::{MonitorState, NoticeDelivery};
