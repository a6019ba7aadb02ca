//! Session configuration.

use std::fmt;
use std::sync::Arc;

use osistack_transport::{CommunicationStatus, Port};

// ---------------------------------------------------------------------------
// LoginCallback
// ---------------------------------------------------------------------------

/// Hook invoked once per completed client-side login attempt.
///
/// It receives the transport acknowledgement of the credential message,
/// not the peer's verdict; inspect [`Session::is_logged_in`] for that.
///
/// [`Session::is_logged_in`]: crate::Session::is_logged_in
#[derive(Clone)]
pub struct LoginCallback(Arc<dyn Fn(CommunicationStatus) + Send + Sync>);

impl LoginCallback {
    /// Wraps a closure.
    pub fn new(
        callback: impl Fn(CommunicationStatus) + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(callback))
    }

    /// A callback that does nothing.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub(crate) fn call(&self, status: CommunicationStatus) {
        (self.0)(status)
    }
}

impl Default for LoginCallback {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for LoginCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoginCallback(..)")
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Construction-time settings for a [`Session`](crate::Session).
///
/// ```rust
/// use osistack_session::SessionConfig;
/// use osistack_transport::Port;
///
/// let config = SessionConfig::default()
///     .with_port(Port(7))
///     .with_on_login(|status| println!("login attempt: {status}"));
/// assert_eq!(config.port, Port(7));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Port used for credentials, login responses and stamped data.
    ///
    /// Default: port 0.
    pub port: Port,

    /// Called after each client-side handshake. Default: no-op.
    pub on_login: LoginCallback,
}

impl SessionConfig {
    pub fn with_port(mut self, port: Port) -> Self {
        self.port = port;
        self
    }

    pub fn with_on_login(
        mut self,
        callback: impl Fn(CommunicationStatus) + Send + Sync + 'static,
    ) -> Self {
        self.on_login = LoginCallback::new(callback);
        self
    }
}
