//! Values exchanged during a handshake.

use std::fmt;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A user/password pair.
///
/// Both halves are opaque byte strings compared for exact equality. They
/// travel in plaintext and are never hashed.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    user: Vec<u8>,
    pass: Vec<u8>,
}

impl Credentials {
    /// Creates credentials from anything convertible to bytes.
    pub fn new(user: impl Into<Vec<u8>>, pass: impl Into<Vec<u8>>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }

    /// The user name bytes.
    pub fn user(&self) -> &[u8] {
        &self.user
    }

    /// The password bytes.
    pub fn pass(&self) -> &[u8] {
        &self.pass
    }

    /// Exact byte equality on both fields.
    pub fn matches(&self, user: &[u8], pass: &[u8]) -> bool {
        self.user == user && self.pass == pass
    }
}

/// The password is never printed.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &String::from_utf8_lossy(&self.user))
            .field("pass", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Cookie
// ---------------------------------------------------------------------------

/// Step added to the previous cookie on every successful login.
///
/// The sequence departs from plain `c + 0xBEEF mod 2^16` only at the step
/// that would land on zero, where [`Cookie::next`] steps once more.
pub const COOKIE_INCREMENT: u16 = 0xBEEF;

/// 16-bit session token. Zero means "not authenticated".
///
/// Cookies are deterministic, not secret: each successful login advances
/// the previous value by [`COOKIE_INCREMENT`], wrapping at 2^16.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Cookie(pub u16);

impl Cookie {
    /// The unauthenticated sentinel.
    pub const NONE: Cookie = Cookie(0);

    /// Whether this cookie denotes an active session.
    pub fn is_active(self) -> bool {
        self != Self::NONE
    }

    /// The cookie issued after this one.
    ///
    /// Since the increment is odd, the plain wrapping sequence only returns
    /// to zero after 65536 steps. When it does, the sentinel is skipped so a
    /// successful login always yields an active cookie.
    pub fn next(self) -> Cookie {
        let next = self.0.wrapping_add(COOKIE_INCREMENT);
        if next == 0 {
            Cookie(next.wrapping_add(COOKIE_INCREMENT))
        } else {
            Cookie(next)
        }
    }

    /// Big-endian wire bytes.
    pub fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Reads a cookie from big-endian wire bytes.
    pub fn from_be_bytes(bytes: [u8; 2]) -> Cookie {
        Cookie(u16::from_be_bytes(bytes))
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

// ---------------------------------------------------------------------------
// LoginStatus
// ---------------------------------------------------------------------------

/// Outcome of checking a credential pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LoginStatus {
    #[default]
    Unknown = 0x00,
    Error = 0x01,
    InvalidCredentials = 0x02,
    Success = 0x03,
}

impl LoginStatus {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for LoginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "unknown",
            Self::Error => "error",
            Self::InvalidCredentials => "invalid credentials",
            Self::Success => "success",
        };
        f.write_str(name)
    }
}
