//! Peer connection abstraction.
//!
//! # Responsibilities
//! - Non-blocking receive for the liveness monitor's poll loop
//! - Single-shot send of the timeout notice
//! - Orderly close of the client handle
//!
//! The monitor is generic over [`Connection`] so it can be driven by a real
//! TCP stream or by a scripted fake in tests.

use std::io;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// Result of one non-blocking receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// `n` bytes were written to the start of the buffer.
    Data(usize),
    /// Nothing available right now.
    WouldBlock,
    /// The peer closed its end (orderly EOF).
    Closed,
}

/// A connected peer as seen by the liveness monitor.
#[allow(async_fn_in_trait)]
pub trait Connection {
    /// Receive whatever is available without suspending.
    fn try_recv(&mut self, buf: &mut [u8]) -> io::Result<Received>;

    /// Write `bytes` with a single send, returning how many were written.
    async fn send(&mut self, bytes: &[u8]) -> io::Result<usize>;

    /// Close the write half and release the handle.
    async fn close(&mut self) -> io::Result<()>;
}

/// The accepted TCP client.
#[derive(Debug)]
pub struct TcpConnection {
    stream: TcpStream,
    peer_addr: SocketAddr,
}

impl TcpConnection {
    pub fn new(stream: TcpStream, peer_addr: SocketAddr) -> Self {
        Self { stream, peer_addr }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Borrow the stream for the blocking handshake receive.
    pub(crate) fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }
}

impl Connection for TcpConnection {
    fn try_recv(&mut self, buf: &mut [u8]) -> io::Result<Received> {
        match self.stream.try_read(buf) {
            Ok(0) => Ok(Received::Closed),
            Ok(n) => Ok(Received::Data(n)),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(Received::WouldBlock),
            Err(e) => Err(e),
        }
    }

    async fn send(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.stream.write(bytes).await
    }

    async fn close(&mut self) -> io::Result<()> {
        self.stream.shutdown().await?;
        tracing::trace!(peer_addr = %self.peer_addr, "Client connection closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn pair() -> (TcpConnection, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, peer) = listener.accept().await.unwrap();
        (TcpConnection::new(server, peer), client)
    }

    async fn recv_until_ready(conn: &mut TcpConnection, buf: &mut [u8]) -> Received {
        loop {
            match conn.try_recv(buf).unwrap() {
                Received::WouldBlock => tokio::task::yield_now().await,
                other => return other,
            }
        }
    }

    #[tokio::test]
    async fn try_recv_without_data_would_block() {
        let (mut conn, _client) = pair().await;
        let mut buf = [0u8; 64];
        assert_eq!(conn.try_recv(&mut buf).unwrap(), Received::WouldBlock);
    }

    #[tokio::test]
    async fn try_recv_returns_data_then_closed() {
        let (mut conn, mut client) = pair().await;
        client.write_all(b"hello").await.unwrap();

        let mut buf = [0u8; 64];
        assert_eq!(recv_until_ready(&mut conn, &mut buf).await, Received::Data(5));
        assert_eq!(&buf[..5], b"hello");

        drop(client);
        assert_eq!(recv_until_ready(&mut conn, &mut buf).await, Received::Closed);
    }

    #[tokio::test]
    async fn send_and_close_reach_the_peer() {
        let (mut conn, mut client) = pair().await;
        assert_eq!(conn.send(b"TIMEOUT\0").await.unwrap(), 8);
        conn.close().await.unwrap();

        let mut received = Vec::new();
        client.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, b"TIMEOUT\0");
    }
}
