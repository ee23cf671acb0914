use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use tracing::{debug, info};

use super::message::OutboundMessage;

// Emitter errors
#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    #[error("Failed to bind sending socket: {0}")]
    BindError(#[source] io::Error),

    #[error("Failed to send datagram to {destination}: {source}")]
    SendError {
        destination: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// Destination for tracker messages.
///
/// The frame loop only talks to this trait so it can run against a recorder
/// in tests.
pub trait MessageSink {
    /// Sends one message, returning the number of bytes handed to the OS
    fn emit(&mut self, message: &OutboundMessage) -> Result<usize, EmitterError>;
}

/// Fire-and-forget UDP sender.
///
/// One datagram per message; no acknowledgment, retry or sequencing.
#[derive(Debug)]
pub struct UdpEmitter {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl UdpEmitter {
    pub fn bind(destination: SocketAddr) -> Result<Self, EmitterError> {
        let socket = match destination {
            SocketAddr::V4(_) => UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => UdpSocket::bind((Ipv6Addr::UNSPECIFIED, 0)),
        }
        .map_err(EmitterError::BindError)?;

        info!(
            "UDP emitter bound to {:?}, sending to {}",
            socket.local_addr().ok(),
            destination
        );
        Ok(Self {
            socket,
            destination,
        })
    }
}

impl MessageSink for UdpEmitter {
    fn emit(&mut self, message: &OutboundMessage) -> Result<usize, EmitterError> {
        let sent = self
            .socket
            .send_to(&message.to_bytes(), self.destination)
            .map_err(|source| EmitterError::SendError {
                destination: self.destination,
                source,
            })?;
        debug!("Sent {} bytes to {}: {}", sent, self.destination, message);
        Ok(sent)
    }
}
