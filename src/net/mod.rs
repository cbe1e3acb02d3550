//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Listening socket
//!     → listener.rs (reuse-address bind, backlog 3)
//!     → acceptor.rs (accept once, grace delay, handshake receive)
//!     → connection.rs (non-blocking receive, notice send, close)
//!     → Hand off to the liveness monitor
//! ```
//!
//! # Design Decisions
//! - Exactly one connection is ever accepted
//! - The handshake receive suspends; every later receive is non-blocking
//! - Setup failures are fatal and surface as `SetupError`

pub mod acceptor;
pub mod connection;
pub mod listener;

pub use acceptor::acquire_single_connection;
pub use connection::{Connection, Received, TcpConnection};
pub use listener::Listener;
