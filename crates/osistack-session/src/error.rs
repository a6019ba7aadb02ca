//! Error types for the session layer.

use osistack_transport::{CommunicationStatus, PeerId, TransportError};

/// Errors returned by [`Session`](crate::Session) operations.
///
/// Credential mismatches are not errors here: they are an ordinary
/// [`LoginStatus`](osistack_protocol::LoginStatus) outcome.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The login handshake did not produce a cookie, so nothing was sent.
    #[error("no session cookie for {peer}: login handshake did not succeed")]
    CookieMissing {
        /// Peer the data was addressed to.
        peer: PeerId,
    },

    /// The transport failed underneath the session.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SessionError {
    /// Status code view of this error.
    pub fn status(&self) -> CommunicationStatus {
        match self {
            Self::CookieMissing { .. } => CommunicationStatus::SessionCookieError,
            Self::Transport(_) => CommunicationStatus::Error,
        }
    }
}
