//! Transport layer for encoded Art-Net frames
//!
//! The sender task only needs "put these bytes on the wire". UDP is the
//! real transport; the null transport backs dry runs.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tracing::{debug, info};

use crate::error::{GestureLinkError, Result};

// ============================================================================
// TRANSPORT TRAIT ABSTRACTION
// ============================================================================

/// Sink for encoded frames, driven by the emitter's sender task
#[async_trait]
pub trait DmxTransport: Send + Sync + 'static {
    /// Send one encoded frame. Returns once the datagram is handed to the OS.
    async fn send_frame(&self, frame: &[u8]) -> io::Result<()>;

    /// Human-readable destination for logs
    fn describe(&self) -> String;
}

// ============================================================================
// UDP TRANSPORT
// ============================================================================

/// Art-Net over UDP to a single node (or broadcast address)
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpTransport {
    /// Bind an ephemeral local socket for sending to `target`
    pub async fn bind(target: SocketAddr) -> Result<Self> {
        let local = match target.ip() {
            IpAddr::V4(_) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            IpAddr::V6(_) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };
        let socket = UdpSocket::bind(local).await?;
        // Art-Net nodes are commonly addressed via the subnet broadcast
        socket.set_broadcast(true)?;

        info!(%target, local = %socket.local_addr()?, "Art-Net UDP transport ready");
        Ok(Self { socket, target })
    }

    /// Resolve `ip:port` and bind
    pub async fn connect(ip: &str, port: u16) -> Result<Self> {
        let addr: IpAddr = ip
            .parse()
            .map_err(|_| GestureLinkError::InvalidAddress(ip.to_string()))?;
        Self::bind(SocketAddr::new(addr, port)).await
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

#[async_trait]
impl DmxTransport for UdpTransport {
    async fn send_frame(&self, frame: &[u8]) -> io::Result<()> {
        let sent = self.socket.send_to(frame, self.target).await?;
        if sent != frame.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram: {sent} of {} bytes", frame.len()),
            ));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.target)
    }
}

// ============================================================================
// NULL TRANSPORT (dry run)
// ============================================================================

/// Accepts every frame and only logs it
#[derive(Debug, Default)]
pub struct NullTransport;

#[async_trait]
impl DmxTransport for NullTransport {
    async fn send_frame(&self, frame: &[u8]) -> io::Result<()> {
        debug!(len = frame.len(), "dry run: frame discarded");
        Ok(())
    }

    fn describe(&self) -> String {
        "dry-run".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_bad_address() {
        let err = UdpTransport::connect("not-an-ip", 6454).await.err().unwrap();
        assert!(matches!(err, GestureLinkError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_udp_frame_arrives() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let transport = UdpTransport::bind(receiver.local_addr().unwrap())
            .await
            .unwrap();
        assert_eq!(transport.target(), receiver.local_addr().unwrap());

        transport.send_frame(&[1, 2, 3]).await.unwrap();

        let mut buf = [0u8; 16];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..len], &[1, 2, 3]);
        assert!(transport.describe().starts_with("udp://127.0.0.1:"));
    }
}
