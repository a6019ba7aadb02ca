//! Transport contract for osistack.
//!
//! The session layer never touches framing, checksums or byte I/O. It talks
//! to whatever sits below it through the [`Transport`] trait: one blocking
//! call to send a logical message to a peer, one blocking call to fetch the
//! next message from a peer.
//!
//! ```text
//! Session (above)   ← authenticates peers, stamps data with a cookie
//!     ↕
//! Transport (this crate)   ← delivers one logical message per call
//!     ↕
//! Network / Datalink+CRC / Physical (below, not modelled here)
//! ```
//!
//! # Feature Flags
//!
//! - `memory` (default): [`MemoryNetwork`], an in-process transport backed
//!   by `tokio` channels. Used by tests and the loopback demo.

mod error;
#[cfg(feature = "memory")]
mod memory;
mod status;

pub use error::TransportError;
#[cfg(feature = "memory")]
pub use memory::{MemoryNetwork, MemoryTransport};
pub use status::CommunicationStatus;

use std::fmt;

/// Address of a remote peer on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(pub u8);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// Logical port a message is sent to or read from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Port(pub u8);

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port-{}", self.0)
    }
}

/// Byte-level send/receive capability consumed by the session layer.
///
/// Both calls block. Integrity of the delivered bytes is the concern of the
/// layers underneath an implementation, not of its callers.
pub trait Transport {
    /// Sends `data` to `to` on `port`.
    ///
    /// The returned status is a transport-level acknowledgement
    /// (typically [`CommunicationStatus::Acknowledge`] or
    /// [`CommunicationStatus::NoAcknowledgeRequired`]), not an
    /// application-level answer from the peer.
    fn transmit(
        &self,
        to: PeerId,
        data: &[u8],
        port: Port,
    ) -> Result<CommunicationStatus, TransportError>;

    /// Blocks until the next message from `from` on `port` is available.
    fn receive(
        &self,
        from: PeerId,
        port: Port,
    ) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn transmit(
        &self,
        to: PeerId,
        data: &[u8],
        port: Port,
    ) -> Result<CommunicationStatus, TransportError> {
        (**self).transmit(to, data, port)
    }

    fn receive(
        &self,
        from: PeerId,
        port: Port,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).receive(from, port)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn transmit(
        &self,
        to: PeerId,
        data: &[u8],
        port: Port,
    ) -> Result<CommunicationStatus, TransportError> {
        (**self).transmit(to, data, port)
    }

    fn receive(
        &self,
        from: PeerId,
        port: Port,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).receive(from, port)
    }
}
