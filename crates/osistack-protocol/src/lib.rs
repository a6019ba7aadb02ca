//! Wire codec for the osistack session layer.
//!
//! This crate defines what travels between two sessions and nothing else.
//! There is no I/O here: every function turns values into bytes or bytes
//! into values.
//!
//! - **Types** ([`Credentials`], [`Cookie`], [`LoginStatus`],
//!   [`LoginResponse`]): the values a handshake exchanges.
//! - **Wire functions** ([`encode_credentials`], [`decode_credentials`],
//!   [`encode_login_status`], [`append_cookie`], [`decode_cookie`]): the
//!   byte layouts.
//!
//! # Payload shapes
//!
//! ```text
//! login request    <user> ' ' <pass>
//! login response   <status> ' ' <cookie-hi> <cookie-lo>
//! data message     <data> ' ' <cookie-hi> <cookie-lo>
//! ```

mod error;
mod types;
mod wire;

pub use error::ProtocolError;
pub use types::{Cookie, Credentials, LoginStatus, COOKIE_INCREMENT};
pub use wire::{
    append_cookie, decode_cookie, decode_credentials, encode_credentials,
    encode_login_status, LoginResponse, SEPARATOR,
};
