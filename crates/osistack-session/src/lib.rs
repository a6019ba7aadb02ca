//! Session layer for osistack.
//!
//! A [`Session`] authenticates a peer once and then stamps every outgoing
//! message with the cookie it received:
//!
//! 1. **Handshake**: the first [`Session::transmit`] to a peer sends this
//!    session's credentials; the first [`Session::receive`] checks incoming
//!    credentials and answers with a status byte and a cookie.
//! 2. **Data path**: once a cookie is held, data is forwarded with
//!    `' ' <cookie-hi> <cookie-lo>` appended.
//!
//! The same type plays client or server depending on which method the
//! application calls first.
//!
//! # How it fits in the stack
//!
//! ```text
//! Application (above)   ← calls transmit / receive
//!     ↕
//! Session Layer (this crate)   ← login handshake, cookie stamping
//!     ↕
//! Protocol (codec) + Transport contract (below)
//! ```

mod config;
mod error;
mod session;

pub use config::{LoginCallback, SessionConfig};
pub use error::SessionError;
pub use session::Session;
