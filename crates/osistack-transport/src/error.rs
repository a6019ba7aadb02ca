use crate::{PeerId, Port};

/// Errors that can occur in the transport layer.
///
/// The session layer treats these as opaque and hands them to its caller.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The channel to the peer was closed while waiting for a message.
    #[error("channel from {peer} on {port} closed")]
    Closed {
        /// Peer whose channel hung up.
        peer: PeerId,
        /// Port the message was expected on.
        port: Port,
    },

    /// No endpoint is registered for the destination.
    #[error("{0} is unreachable")]
    Unreachable(PeerId),

    /// The underlying byte I/O failed.
    #[error("transport I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
