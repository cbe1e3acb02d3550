//! The single monitored session.
//!
//! Holds the deadline and heartbeat bookkeeping that the liveness monitor
//! mutates. There is exactly one `Session` per process run; it is created once
//! the acceptor hands over a connection and dropped when the monitor ends.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    peer_addr: Option<SocketAddr>,
    window: Duration,
    deadline: Instant,
    last_heartbeat_at: Option<Instant>,
    heartbeats: u64,
}

impl Session {
    /// Create a session with its deadline armed one window from `now`.
    pub fn new(peer_addr: Option<SocketAddr>, window: Duration, now: Instant) -> Self {
        Self {
            id: Uuid::new_v4(),
            peer_addr,
            window,
            deadline: now + window,
            last_heartbeat_at: None,
            heartbeats: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn last_heartbeat_at(&self) -> Option<Instant> {
        self.last_heartbeat_at
    }

    pub fn heartbeats(&self) -> u64 {
        self.heartbeats
    }

    /// Re-arm the deadline one window from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = now + self.window;
    }

    /// Record a heartbeat observed at `now` and push the deadline out.
    pub fn record_heartbeat(&mut self, now: Instant) {
        self.last_heartbeat_at = Some(now);
        self.heartbeats += 1;
        self.arm(now);
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}
