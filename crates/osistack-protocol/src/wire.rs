//! Byte layouts of handshake and data payloads.

use osistack_transport::CommunicationStatus;

use crate::{Cookie, Credentials, LoginStatus, ProtocolError};

/// Separates fields in every payload.
pub const SEPARATOR: u8 = b' ';

/// `<user> ' ' <pass>`, no terminator.
pub fn encode_credentials(credentials: &Credentials) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(credentials.user().len() + 1 + credentials.pass().len());
    out.extend_from_slice(credentials.user());
    out.push(SEPARATOR);
    out.extend_from_slice(credentials.pass());
    out
}

/// Splits a login request at its first space.
///
/// Every later space is replaced by a `0x00` byte inside the password
/// instead of starting a third field, so `"u p q"` decodes to user `"u"`
/// and password `"p\0q"`. Input without a space is all user name.
pub fn decode_credentials(payload: &[u8]) -> Credentials {
    let (user, pass) =
        match payload.iter().position(|&b| b == SEPARATOR) {
            Some(at) => (&payload[..at], &payload[at + 1..]),
            None => (payload, &[][..]),
        };

    let pass: Vec<u8> = pass
        .iter()
        .map(|&b| if b == SEPARATOR { 0 } else { b })
        .collect();

    Credentials::new(user, pass)
}

/// The single status byte sent back for a login attempt.
pub fn encode_login_status(status: LoginStatus) -> u8 {
    let wire = match status {
        LoginStatus::Success => CommunicationStatus::Acknowledge,
        LoginStatus::InvalidCredentials => {
            CommunicationStatus::InvalidCredentials
        }
        LoginStatus::Error => CommunicationStatus::Error,
        LoginStatus::Unknown => CommunicationStatus::Unknown,
    };
    wire.as_byte()
}

/// Appends `' ' <hi> <lo>` to `payload`.
pub fn append_cookie(payload: &mut Vec<u8>, cookie: Cookie) {
    payload.push(SEPARATOR);
    payload.extend_from_slice(&cookie.to_be_bytes());
}

/// Reads the cookie out of a login response.
///
/// Anything other than an acknowledged response with a well-formed cookie
/// yields [`Cookie::NONE`].
pub fn decode_cookie(payload: &[u8]) -> Cookie {
    match payload {
        [status, SEPARATOR, hi, lo, ..]
            if *status == CommunicationStatus::Acknowledge.as_byte() =>
        {
            Cookie::from_be_bytes([*hi, *lo])
        }
        _ => Cookie::NONE,
    }
}

/// A parsed `<status> ' ' <hi> <lo>` login response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginResponse {
    pub status: CommunicationStatus,
    pub cookie: Cookie,
}

impl LoginResponse {
    /// Length of an encoded response.
    pub const LEN: usize = 4;

    /// Serialises the response.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.push(self.status.as_byte());
        append_cookie(&mut out, self.cookie);
        out
    }

    /// Strict parse of a login response.
    ///
    /// Unlike [`decode_cookie`], the cookie is returned whatever the status
    /// says, which lets callers report a rejection alongside the bytes the
    /// peer sent.
    ///
    /// # Errors
    /// [`ProtocolError::Truncated`] if fewer than four bytes are given,
    /// [`ProtocolError::MissingSeparator`] if byte 1 is not a space.
    pub fn decode(payload: &[u8]) -> Result<Self, ProtocolError> {
        let &[status, separator, hi, lo, ..] = payload else {
            return Err(ProtocolError::Truncated {
                expected: Self::LEN,
                actual: payload.len(),
            });
        };
        if separator != SEPARATOR {
            return Err(ProtocolError::MissingSeparator {
                offset: 1,
                found: separator,
            });
        }
        Ok(Self {
            status: CommunicationStatus::from_byte(status),
            cookie: Cookie::from_be_bytes([hi, lo]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACK: u8 = 0x06;

    #[test]
    fn test_encode_credentials_joins_with_single_space() {
        let creds = Credentials::new("abcd", "1234");

        assert_eq!(encode_credentials(&creds), b"abcd 1234");
    }

    #[test]
    fn test_encode_credentials_empty_fields() {
        assert_eq!(encode_credentials(&Credentials::new("", "")), b" ");
    }

    #[test]
    fn test_decode_credentials_splits_at_first_space() {
        let creds = decode_credentials(b"abcd 1234");

        assert_eq!(creds.user(), b"abcd");
        assert_eq!(creds.pass(), b"1234");
    }

    #[test]
    fn test_decode_credentials_later_space_becomes_nul_in_pass() {
        let creds = decode_credentials(b"user pa ss word");

        assert_eq!(creds.user(), b"user");
        assert_eq!(creds.pass(), b"pa\0ss\0word");
    }

    #[test]
    fn test_decode_credentials_without_space_is_all_user() {
        let creds = decode_credentials(b"lonely");

        assert_eq!(creds.user(), b"lonely");
        assert!(creds.pass().is_empty());
    }

    #[test]
    fn test_decode_credentials_empty_payload() {
        assert_eq!(decode_credentials(b""), Credentials::new("", ""));
    }

    #[test]
    fn test_encode_login_status_maps_to_communication_status() {
        assert_eq!(encode_login_status(LoginStatus::Success), ACK);
        assert_eq!(
            encode_login_status(LoginStatus::InvalidCredentials),
            CommunicationStatus::InvalidCredentials.as_byte()
        );
        assert_eq!(
            encode_login_status(LoginStatus::Error),
            CommunicationStatus::Error.as_byte()
        );
        assert_eq!(
            encode_login_status(LoginStatus::Unknown),
            CommunicationStatus::Unknown.as_byte()
        );
    }

    #[test]
    fn test_append_cookie_is_space_then_big_endian() {
        let mut payload = b"hello".to_vec();

        append_cookie(&mut payload, Cookie(0xBEEF));

        assert_eq!(payload, b"hello \xBE\xEF");
    }

    #[test]
    fn test_append_cookie_none_still_appends_zero_bytes() {
        let mut payload = vec![CommunicationStatus::InvalidCredentials.as_byte()];

        append_cookie(&mut payload, Cookie::NONE);

        assert_eq!(payload, vec![0x02, b' ', 0, 0]);
    }

    #[test]
    fn test_decode_cookie_acknowledged_response() {
        assert_eq!(decode_cookie(&[ACK, b' ', 0x12, 0x34]), Cookie(0x1234));
    }

    #[test]
    fn test_decode_cookie_rejected_response_is_none() {
        let payload = [CommunicationStatus::InvalidCredentials.as_byte(), b' ', 0xBE, 0xEF];

        assert_eq!(decode_cookie(&payload), Cookie::NONE);
    }

    #[test]
    fn test_decode_cookie_missing_separator_is_none() {
        assert_eq!(decode_cookie(&[ACK, b'x', 0xBE, 0xEF]), Cookie::NONE);
    }

    #[test]
    fn test_decode_cookie_short_payload_is_none() {
        assert_eq!(decode_cookie(&[]), Cookie::NONE);
        assert_eq!(decode_cookie(&[ACK]), Cookie::NONE);
        assert_eq!(decode_cookie(&[ACK, b' ', 0xBE]), Cookie::NONE);
    }

    #[test]
    fn test_login_response_encode_matches_wire_functions() {
        let response = LoginResponse {
            status: CommunicationStatus::Acknowledge,
            cookie: Cookie(0xBEEF),
        };

        let bytes = response.encode();

        let mut expected = vec![encode_login_status(LoginStatus::Success)];
        append_cookie(&mut expected, Cookie(0xBEEF));
        assert_eq!(bytes, expected);
        assert_eq!(decode_cookie(&bytes), Cookie(0xBEEF));
    }

    #[test]
    fn test_login_response_decode_keeps_cookie_of_rejection() {
        let response = LoginResponse::decode(&[0x02, b' ', 0x00, 0x07]).unwrap();

        assert_eq!(response.status, CommunicationStatus::InvalidCredentials);
        assert_eq!(response.cookie, Cookie(7));
    }

    #[test]
    fn test_login_response_decode_truncated() {
        assert_eq!(
            LoginResponse::decode(&[ACK, b' ']),
            Err(ProtocolError::Truncated {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_login_response_decode_missing_separator() {
        assert_eq!(
            LoginResponse::decode(&[ACK, b'-', 0, 1]),
            Err(ProtocolError::MissingSeparator {
                offset: 1,
                found: b'-'
            })
        );
    }
}
