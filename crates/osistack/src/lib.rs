//! # osistack
//!
//! A minimal layered communication stack. A [`Session`] authenticates a
//! peer with a user/password handshake and stamps every later message with
//! the 16-bit cookie the peer issued. Everything below the session is
//! reached through the [`Transport`] contract.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use osistack::prelude::*;
//!
//! # fn main() -> Result<(), OsiError> {
//! let net = MemoryNetwork::new();
//! let (credentials, config) = IdentityConfig::from_json_str(
//!     r#"{ "user": "abcd", "pass": "1234", "port": 7 }"#,
//! )?
//! .into_parts();
//!
//! let client = Session::new(net.endpoint(PeerId(1)), credentials, config);
//! // Blocks until peer-2 answers the login request.
//! client.transmit(PeerId(2), b"hello")?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;

pub use config::IdentityConfig;
pub use error::{ConfigError, OsiError};

pub use osistack_protocol as protocol;
pub use osistack_session as session;
pub use osistack_transport as transport;

pub use osistack_protocol::{Cookie, Credentials, LoginStatus};
pub use osistack_session::{LoginCallback, Session, SessionConfig, SessionError};
pub use osistack_transport::{
    CommunicationStatus, MemoryNetwork, MemoryTransport, PeerId, Port,
    Transport, TransportError,
};

pub mod prelude {
    pub use crate::{
        CommunicationStatus, Cookie, Credentials, IdentityConfig,
        LoginStatus, MemoryNetwork, OsiError, PeerId, Port, Session,
        SessionConfig, Transport,
    };
}
