//! UDP plumbing between the controller and the lighting console
//!
//! ```text
//! FrameLoop ─[OutboundMessage]→ UdpEmitter ─(UDP, "x,0,y,channel,label")→ console
//!                                                                      └→ DebugListener
//! ```
//!
//! There is no handshake, acknowledgment or framing beyond the datagram
//! itself.

pub mod emitter;
pub mod endpoint;
pub mod listener;
pub mod message;

pub use emitter::{EmitterError, MessageSink, UdpEmitter};
pub use listener::{DebugListener, ListenerError, ReceivedDatagram};
pub use message::{MessageParseError, OutboundMessage};
