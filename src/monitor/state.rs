//! Liveness monitor state machine.
//!
//! # States
//! - Waiting: polling for heartbeats, deadline armed
//! - Notified: timeout notice sent (expected terminal state)
//! - Failed: receive or send failed (terminal)
//!
//! # State Transitions
//! ```text
//! Waiting → Waiting:  heartbeat received, deadline reset
//! Waiting → Notified: deadline expired, notice sent
//! Waiting → Failed:   recv error, peer closed, or send error
//! ```
//!
//! Terminal states never transition again, which is what keeps the timeout
//! notice to a single send per session.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Waiting,
    Notified,
    Failed,
}

impl MonitorState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MonitorState::Waiting)
    }

    /// Move to `next`. Returns false (and stays put) when leaving a terminal state.
    pub fn transition(&mut self, next: MonitorState) -> bool {
        if self.is_terminal() {
            return false;
        }
        tracing::debug!(from = %self, to = %next, "Monitor state transition");
        *self = next;
        true
    }
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorState::Waiting => "waiting",
            MonitorState::Notified => "notified",
            MonitorState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How much of the timeout notice reached the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeDelivery {
    /// Every byte was handed to the kernel.
    Complete,
    /// The send wrote zero bytes; the peer had already closed its end.
    PeerClosed,
    /// Only part of the notice was written.
    Short { sent: usize, expected: usize },
}

impl NoticeDelivery {
    pub fn from_sent(sent: usize, expected: usize) -> Self {
        if sent == 0 {
            NoticeDelivery::PeerClosed
        } else if sent < expected {
            NoticeDelivery::Short { sent, expected }
        } else {
            NoticeDelivery::Complete
        }
    }
}
