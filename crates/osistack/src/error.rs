//! Unified error type for the osistack facade.

use std::path::PathBuf;

use osistack_protocol::ProtocolError;
use osistack_session::SessionError;
use osistack_transport::TransportError;

/// Errors raised while loading an [`IdentityConfig`](crate::IdentityConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON was malformed or missing fields.
    #[error("invalid identity config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The user name was empty.
    #[error("identity user name must not be empty")]
    EmptyUser,
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert layer errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum OsiError {
    /// A transport-level error (unreachable peer, closed channel, I/O).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A malformed payload.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (no cookie, or a transport failure inside a
    /// session call).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use osistack_transport::PeerId;

    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err: OsiError = TransportError::Unreachable(PeerId(4)).into();
        assert!(matches!(err, OsiError::Transport(_)));
        assert!(err.to_string().contains("peer-4"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err: OsiError = ProtocolError::Truncated {
            expected: 4,
            actual: 1,
        }
        .into();
        assert!(matches!(err, OsiError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err: OsiError =
            SessionError::CookieMissing { peer: PeerId(2) }.into();
        assert!(matches!(err, OsiError::Session(_)));
    }

    #[test]
    fn test_from_config_error() {
        let err: OsiError = ConfigError::EmptyUser.into();
        assert!(matches!(err, OsiError::Config(_)));
        assert_eq!(err.to_string(), "identity user name must not be empty");
    }
}
