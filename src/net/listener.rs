//! TCP listener implementation.
//!
//! # Responsibilities
//! - Bind the configured IPv4 address with address reuse enabled
//! - Arm the listen queue with the configured backlog
//! - Accept incoming TCP connections
//!
//! Bind and listen are separate steps so their failures can be told apart.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::config::ListenerConfig;
use crate::error::SetupError;

/// A bound, listening TCP socket.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to the configured address and start listening.
    pub fn bind(config: &ListenerConfig) -> Result<Self, SetupError> {
        let ip: Ipv4Addr = config
            .bind_address
            .parse()
            .map_err(|source| SetupError::Address {
                address: config.bind_address.clone(),
                source,
            })?;
        let addr = SocketAddr::V4(SocketAddrV4::new(ip, config.port));

        let socket = TcpSocket::new_v4().map_err(SetupError::Bind)?;
        // A restart must not trip over a previous bind lingering in TIME_WAIT.
        socket.set_reuseaddr(true).map_err(SetupError::Bind)?;
        socket.bind(addr).map_err(SetupError::Bind)?;

        let inner = socket.listen(config.backlog).map_err(SetupError::Listen)?;
        let local_addr = inner.local_addr().map_err(SetupError::Listen)?;

        tracing::info!(
            address = %local_addr,
            backlog = config.backlog,
            "Bind() success"
        );

        Ok(Self { inner })
    }

    /// Accept the next connection. Waits indefinitely.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), SetupError> {
        let (stream, addr) = self.inner.accept().await.map_err(SetupError::Accept)?;

        tracing::debug!(peer_addr = %addr, "Connection accepted");

        Ok((stream, addr))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}
