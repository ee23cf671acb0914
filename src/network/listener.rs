use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, info};

use super::message::OutboundMessage;

/// Largest datagram read in one receive; longer ones are truncated
pub const RECEIVE_BUFFER_SIZE: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("Failed to bind {addr}: {source}")]
    BindError {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read local address: {0}")]
    LocalAddrError(#[source] io::Error),

    #[error("Failed to receive datagram: {0}")]
    ReceiveError(#[source] io::Error),

    #[error("Failed to write output: {0}")]
    OutputError(#[from] io::Error),
}

/// A datagram as the listener reports it
#[derive(Debug, Clone)]
pub struct ReceivedDatagram {
    pub from: SocketAddr,
    pub text: String,
    pub received_at: DateTime<Local>,
}

impl ReceivedDatagram {
    /// Invalid UTF-8 is replaced rather than rejected
    pub fn decode(from: SocketAddr, bytes: &[u8]) -> Self {
        Self {
            from,
            text: String::from_utf8_lossy(bytes).into_owned(),
            received_at: Local::now(),
        }
    }

    pub fn report_line(&self) -> String {
        format!("Received from {}: {}", self.from, self.text)
    }
}

/// Prints every datagram arriving on one UDP port
#[derive(Debug)]
pub struct DebugListener {
    socket: UdpSocket,
}

impl DebugListener {
    pub async fn bind(addr: SocketAddr) -> Result<Self, ListenerError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| ListenerError::BindError { addr, source })?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ListenerError> {
        self.socket.local_addr().map_err(ListenerError::LocalAddrError)
    }

    pub async fn receive(&self) -> Result<ReceivedDatagram, ListenerError> {
        let mut buf = [0u8; RECEIVE_BUFFER_SIZE];
        let (len, from) = self
            .socket
            .recv_from(&mut buf)
            .await
            .map_err(ListenerError::ReceiveError)?;
        Ok(ReceivedDatagram::decode(from, &buf[..len]))
    }

    /// Receives and reports datagrams until an error occurs.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<(), ListenerError> {
        info!("Listening on UDP {}...", self.local_addr()?);
        loop {
            let datagram = self.receive().await?;
            writeln!(out, "{}", datagram.report_line())?;
            out.flush()?;

            match datagram.text.parse::<OutboundMessage>() {
                Ok(message) => debug!(
                    "[{}] channel {} ({}) at x={} y={}",
                    datagram.received_at.format("%H:%M:%S.%3f"),
                    message.channel,
                    message.label,
                    message.x,
                    message.y
                ),
                Err(e) => debug!(
                    "[{}] Not a tracker message: {}",
                    datagram.received_at.format("%H:%M:%S.%3f"),
                    e
                ),
            }
        }
    }
}
