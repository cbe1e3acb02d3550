//! Single-connection acceptor.
//!
//! # Responsibilities
//! - Accept exactly one peer from the listener
//! - Give the peer a grace delay to start its send loop
//! - Consume the peer's first message with a blocking receive
//!
//! The listener is kept by the caller until the session ends but is never
//! accepted on again, so later connection attempts sit in the kernel queue
//! unserved and are reset when the process exits.
//!
//! A peer that closes before sending anything fails setup here (exit status 2)
//! instead of being handed to the monitor loop with an empty first read.

use std::net::SocketAddr;
use tokio::io::AsyncReadExt;

use crate::config::MonitorConfig;
use crate::error::SetupError;
use crate::net::connection::TcpConnection;
use crate::net::listener::Listener;

/// Accept one connection and complete the handshake receive.
///
/// The returned connection is ready for non-blocking polling.
pub async fn acquire_single_connection(
    listener: &Listener,
    config: &MonitorConfig,
) -> Result<TcpConnection, SetupError> {
    tracing::info!("Waiting for incoming TCP-connections...");

    let (stream, peer_addr) = listener.accept().await?;
    tracing::info!(peer_addr = %peer_addr, "A new client connection accepted");

    let mut connection = TcpConnection::new(stream, peer_addr);

    tokio::time::sleep(config.grace()).await;
    handshake(&mut connection, peer_addr, config.buffer_size).await?;

    Ok(connection)
}

/// Wait for the peer's first message and discard it.
async fn handshake(
    connection: &mut TcpConnection,
    peer_addr: SocketAddr,
    buffer_size: usize,
) -> Result<(), SetupError> {
    let mut buf = vec![0u8; buffer_size];
    let n = connection
        .stream_mut()
        .read(&mut buf)
        .await
        .map_err(SetupError::Handshake)?;

    if n == 0 {
        return Err(SetupError::HandshakeClosed);
    }

    tracing::debug!(peer_addr = %peer_addr, bytes = n, "Handshake message discarded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListenerConfig;
    use crate::net::connection::{Connection, Received};
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpStream;

    fn setup() -> (Listener, SocketAddr, MonitorConfig) {
        let listener = Listener::bind(&ListenerConfig {
            bind_address: "127.0.0.1".into(),
            port: 0,
            backlog: 3,
        })
        .unwrap();
        let addr = listener.local_addr().unwrap();
        let config = MonitorConfig {
            grace_ms: 50,
            ..MonitorConfig::default()
        };
        (listener, addr, config)
    }

    #[tokio::test]
    async fn handshake_consumes_first_message() {
        let (listener, addr, config) = setup();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream.write_all(b"x").await.unwrap();
            stream
        });

        let mut connection = acquire_single_connection(&listener, &config).await.unwrap();
        let _client = client.await.unwrap();

        let mut buf = [0u8; 16];
        assert_eq!(connection.try_recv(&mut buf).unwrap(), Received::WouldBlock);
    }

    #[tokio::test]
    async fn handshake_waits_for_a_late_first_message() {
        let (listener, addr, config) = setup();

        let client = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            stream.write_all(b"late").await.unwrap();
            stream
        });

        let connection = acquire_single_connection(&listener, &config).await.unwrap();
        let client = client.await.unwrap();
        assert_eq!(connection.peer_addr(), client.local_addr().unwrap());
    }

    #[tokio::test]
    async fn peer_closing_before_handshake_is_fatal() {
        let (listener, addr, config) = setup();

        tokio::spawn(async move {
            let stream = TcpStream::connect(addr).await.unwrap();
            drop(stream);
        });

        let err = acquire_single_connection(&listener, &config).await.unwrap_err();
        assert!(matches!(
            err,
            SetupError::HandshakeClosed | SetupError::Handshake(_)
        ));
    }
}
