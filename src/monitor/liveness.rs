//! Heartbeat-reset loop.
//!
//! # Responsibilities
//! - Poll the connection without suspending on reads
//! - Reset the session deadline on every exact heartbeat
//! - Send the timeout notice once the window expires
//! - Close the client handle on every terminal path
//!
//! # Design Decisions
//! - Default poll interval is zero: the loop only yields to the reactor
//!   between receives, so a heartbeat is seen as soon as it lands
//! - The deadline is reset from the moment the heartbeat is observed
//! - Any I/O failure ends the session in `Failed`; there are no retries

use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::monitor::heartbeat::{is_heartbeat, TIMEOUT_NOTICE};
use crate::monitor::session::Session;
use crate::monitor::state::{MonitorState, NoticeDelivery};
use crate::net::connection::{Connection, Received};
use crate::observability::metrics;

/// Minimum spacing between deadline gauge updates from the poll loop.
const GAUGE_INTERVAL: Duration = Duration::from_millis(250);

/// Summary of a session that ended with the timeout notice.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub session_id: Uuid,
    pub state: MonitorState,
    pub heartbeats: u64,
    pub ignored_payloads: u64,
    pub delivery: NoticeDelivery,
    pub elapsed: Duration,
}

/// Watches a single connection for heartbeats.
pub struct LivenessMonitor<C> {
    connection: C,
    session: Session,
    state: MonitorState,
    buffer: Vec<u8>,
    poll_interval: Duration,
    ignored_payloads: u64,
    next_gauge_at: Instant,
}

impl<C: Connection> LivenessMonitor<C> {
    pub fn new(connection: C, peer_addr: Option<SocketAddr>, config: &MonitorConfig) -> Self {
        let now = Instant::now();
        Self {
            connection,
            session: Session::new(peer_addr, config.window(), now),
            state: MonitorState::Waiting,
            buffer: vec![0u8; config.buffer_size],
            poll_interval: config.poll_interval(),
            ignored_payloads: 0,
            next_gauge_at: now,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Run until the window expires or the connection fails.
    ///
    /// `Ok` means the session reached `Notified`; `Err` means `Failed`. The
    /// connection is closed before returning in both cases.
    pub async fn run(mut self) -> Result<RunReport, MonitorError> {
        let started = Instant::now();
        self.session.arm(started);

        tracing::info!(
            window_ms = self.session.window().as_millis() as u64,
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Monitoring heartbeats"
        );

        let result = match self.poll_until_expired().await {
            Ok(()) => self.send_notice().await,
            Err(e) => Err(e),
        };

        let next = match result {
            Ok(_) => MonitorState::Notified,
            Err(_) => MonitorState::Failed,
        };
        self.state.transition(next);

        if let Err(e) = self.connection.close().await {
            tracing::debug!(error = %e, "Client close failed");
        }

        match result {
            Ok(delivery) => {
                metrics::record_timeout(delivery);
                Ok(RunReport {
                    session_id: self.session.id(),
                    state: self.state,
                    heartbeats: self.session.heartbeats(),
                    ignored_payloads: self.ignored_payloads,
                    delivery,
                    elapsed: started.elapsed(),
                })
            }
            Err(e) => {
                metrics::record_failure();
                tracing::error!(
                    error = %e,
                    heartbeats = self.session.heartbeats(),
                    "Session failed"
                );
                Err(e)
            }
        }
    }

    async fn poll_until_expired(&mut self) -> Result<(), MonitorError> {
        loop {
            let now = Instant::now();
            if self.session.is_expired(now) {
                return Ok(());
            }
            if now >= self.next_gauge_at {
                metrics::record_deadline_remaining(self.session.remaining(now));
                self.next_gauge_at = now + GAUGE_INTERVAL;
            }

            let received = self
                .connection
                .try_recv(&mut self.buffer)
                .map_err(MonitorError::Recv)?;

            match received {
                Received::Data(n) => self.observe(n),
                Received::WouldBlock => {}
                Received::Closed => return Err(MonitorError::PeerClosed),
            }

            self.pause().await;
        }
    }

    fn observe(&mut self, n: usize) {
        let payload = &self.buffer[..n];

        if is_heartbeat(payload) {
            let now = Instant::now();
            self.session.record_heartbeat(now);
            metrics::record_heartbeat();
            metrics::record_deadline_remaining(self.session.remaining(now));
            tracing::debug!(
                heartbeats = self.session.heartbeats(),
                "Heartbeat received, deadline reset"
            );
        } else {
            self.ignored_payloads += 1;
            metrics::record_ignored_payload();
            tracing::debug!(bytes = n, "Ignoring non-heartbeat payload");
        }

        self.buffer[..n].fill(0);
    }

    async fn pause(&self) {
        if self.poll_interval.is_zero() {
            // Hands control to the reactor so socket readiness is refreshed.
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn send_notice(&mut self) -> Result<NoticeDelivery, MonitorError> {
        tracing::info!(
            window_secs = self.session.window().as_secs_f64(),
            last_heartbeat_ago_ms = self
                .session
                .last_heartbeat_at()
                .map(|at| at.elapsed().as_millis() as u64),
            "Timer exceeded window, sending timeout"
        );

        let sent = self
            .connection
            .send(TIMEOUT_NOTICE)
            .await
            .map_err(MonitorError::Send)?;

        let delivery = NoticeDelivery::from_sent(sent, TIMEOUT_NOTICE.len());
        match delivery {
            NoticeDelivery::Complete => {
                tracing::info!(bytes = sent, "Timeout notice sent");
            }
            NoticeDelivery::PeerClosed => {
                tracing::warn!("Peer has closed the TCP connection prior to send()");
            }
            NoticeDelivery::Short { sent, expected } => {
                tracing::warn!(sent, expected, "Timeout notice only partially sent");
            }
        }
        Ok(delivery)
    }
}
