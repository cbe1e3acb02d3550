//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use heartbeat_watchdog::config::{ListenerConfig, MonitorConfig};
use heartbeat_watchdog::lifecycle;
use heartbeat_watchdog::net::Listener;
use heartbeat_watchdog::{RunReport, WatchdogError};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

pub const WINDOW: Duration = Duration::from_millis(1000);
pub const GRACE: Duration = Duration::from_millis(100);

/// Shortened timings with the default busy-poll loop.
pub fn fast_config() -> MonitorConfig {
    MonitorConfig {
        window_ms: WINDOW.as_millis() as u64,
        grace_ms: GRACE.as_millis() as u64,
        ..MonitorConfig::default()
    }
}

/// Bind an ephemeral loopback port and run one watchdog session on it.
pub fn spawn_watchdog(
    config: MonitorConfig,
) -> (SocketAddr, JoinHandle<Result<RunReport, WatchdogError>>) {
    let listener = Listener::bind(&ListenerConfig {
        bind_address: "127.0.0.1".into(),
        port: 0,
        backlog: 3,
    })
    .unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move { lifecycle::serve(listener, &config).await });
    (addr, handle)
}

/// Connect and send the throwaway first message the acceptor discards.
pub async fn connect_and_greet(addr: SocketAddr) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.set_nodelay(true).unwrap();
    stream.write_all(b"x").await.unwrap();
    // Let the handshake receive drain the greeting on its own.
    tokio::time::sleep(GRACE * 3).await;
    stream
}
