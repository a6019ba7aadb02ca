//! Error types for the wire codec.
//!
//! The lenient decoders in [`crate::wire`] never fail: they fall back to a
//! sentinel the way the handshake expects. Only the strict
//! [`LoginResponse::decode`](crate::LoginResponse::decode) reports why a
//! payload is malformed.

/// Errors produced by strict payload parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The payload is shorter than the layout requires.
    #[error("payload truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum length of the layout.
        expected: usize,
        /// Length actually received.
        actual: usize,
    },

    /// The byte between two fields was not a space.
    #[error("expected separator at offset {offset}, found {found:#04x}")]
    MissingSeparator {
        /// Position of the offending byte.
        offset: usize,
        /// The byte found there.
        found: u8,
    },
}
