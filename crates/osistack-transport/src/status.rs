//! Status codes returned by the transport and carried in login responses.

use std::fmt;

/// Response code of a transport or session operation.
///
/// Serialises as a single byte. The byte values are fixed: they travel
/// inside login responses, so both peers must agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CommunicationStatus {
    /// Unclassified outcome.
    #[default]
    Unknown = 0x00,
    /// Generic failure.
    Error = 0x01,
    /// The peer rejected the presented credentials.
    InvalidCredentials = 0x02,
    /// An authenticated operation was attempted without a cookie.
    SessionCookieError = 0x03,
    /// The message was delivered and acknowledged.
    Acknowledge = 0x06,
    /// The message was delivered on a channel that does not acknowledge.
    NoAcknowledgeRequired = 0x07,
}

impl CommunicationStatus {
    /// The wire byte for this status.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parses a wire byte. Anything unrecognised becomes [`Self::Unknown`].
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => Self::Error,
            0x02 => Self::InvalidCredentials,
            0x03 => Self::SessionCookieError,
            0x06 => Self::Acknowledge,
            0x07 => Self::NoAcknowledgeRequired,
            _ => Self::Unknown,
        }
    }

    /// Whether the transport accepted the message.
    pub fn is_acknowledged(self) -> bool {
        matches!(self, Self::Acknowledge | Self::NoAcknowledgeRequired)
    }
}

impl From<CommunicationStatus> for u8 {
    fn from(status: CommunicationStatus) -> Self {
        status.as_byte()
    }
}

impl fmt::Display for CommunicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Error => "error",
            Self::InvalidCredentials => "invalid credentials",
            Self::SessionCookieError => "session cookie error",
            Self::Acknowledge => "acknowledge",
            Self::NoAcknowledgeRequired => "no acknowledge required",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CommunicationStatus; 6] = [
        CommunicationStatus::Unknown,
        CommunicationStatus::Error,
        CommunicationStatus::InvalidCredentials,
        CommunicationStatus::SessionCookieError,
        CommunicationStatus::Acknowledge,
        CommunicationStatus::NoAcknowledgeRequired,
    ];

    #[test]
    fn test_from_byte_known_values_round_trip() {
        for status in ALL {
            assert_eq!(CommunicationStatus::from_byte(status.as_byte()), status);
        }
    }

    #[test]
    fn test_from_byte_unassigned_is_unknown() {
        assert_eq!(CommunicationStatus::from_byte(b' '), CommunicationStatus::Unknown);
        assert_eq!(CommunicationStatus::from_byte(0xFF), CommunicationStatus::Unknown);
    }

    #[test]
    fn test_is_acknowledged_only_for_ack_variants() {
        let acked: Vec<_> = ALL.into_iter().filter(|s| s.is_acknowledged()).collect();
        assert_eq!(
            acked,
            vec![
                CommunicationStatus::Acknowledge,
                CommunicationStatus::NoAcknowledgeRequired
            ]
        );
    }

    #[test]
    fn test_status_byte_never_collides_with_space() {
        // The login response separates status and cookie with a space.
        assert!(ALL.iter().all(|s| s.as_byte() != b' '));
    }
}
