//! The session: login handshake and cookie-stamped data path.
//!
//! ```text
//!            login() == Success / handshake gets a cookie
//!   LoggedOut ───────────────────────────────────────────→ LoggedIn
//!  (cookie 0) ←─────────────────────────────────────────── (cookie ≠ 0)
//!                              logout()
//! ```
//!
//! There is no intermediate state: a handshake runs start to finish inside
//! one `transmit` or `receive` call.
//!
//! # Concurrency note
//!
//! The cookie lives in a [`Cell`], so `Session` is `Send` (when its
//! transport is) but never `Sync`. Give each concurrent conversation its
//! own session, or serialise access behind a lock.

use std::cell::Cell;
use std::fmt;

use osistack_protocol::{
    append_cookie, decode_cookie, decode_credentials, encode_credentials,
    encode_login_status, Cookie, Credentials, LoginResponse, LoginStatus,
};
use osistack_transport::{CommunicationStatus, PeerId, Port, Transport};

use crate::{SessionConfig, SessionError};

/// Authentication state and protocol driver for one peer conversation.
///
/// Owns its transport; dropping the session drops the transport.
pub struct Session<T: Transport> {
    transport: T,
    credentials: Credentials,
    config: SessionConfig,
    cookie: Cell<Cookie>,
}

impl<T: Transport> Session<T> {
    /// Creates a logged-out session.
    ///
    /// `credentials` is this session's identity: what it presents when it
    /// initiates a handshake and what it expects when it answers one.
    pub fn new(
        transport: T,
        credentials: Credentials,
        config: SessionConfig,
    ) -> Self {
        Self {
            transport,
            credentials,
            config,
            cookie: Cell::new(Cookie::NONE),
        }
    }

    /// Sends `data` to `to`, logging in first if needed.
    ///
    /// The payload on the wire is `data` followed by `' ' <hi> <lo>`.
    /// Returns the transport's acknowledgement of that payload.
    ///
    /// # Errors
    /// - [`SessionError::CookieMissing`] if the handshake did not yield a
    ///   cookie; no data is sent in that case.
    /// - [`SessionError::Transport`] if the transport fails at any step.
    pub fn transmit(
        &self,
        to: PeerId,
        data: &[u8],
    ) -> Result<CommunicationStatus, SessionError> {
        if !self.is_logged_in() {
            self.handshake(to)?;
        }

        if !self.is_logged_in() {
            tracing::warn!(peer = %to, "refusing to transmit without a session cookie");
            return Err(SessionError::CookieMissing { peer: to });
        }

        self.transmit_with_cookie(to, data.to_vec())
    }

    /// Receives the next message from `from` on `port`.
    ///
    /// While logged in the payload is returned verbatim, cookie bytes
    /// included. While logged out the payload is treated as a login
    /// request: it is checked against this session's credentials, the
    /// verdict plus the current cookie is sent back to `from`, and the one
    /// status byte is returned instead of the request.
    ///
    /// # Errors
    /// [`SessionError::Transport`] if receiving or replying fails. A failed
    /// reply rolls the cookie back, so the next request is again treated
    /// as a login attempt.
    pub fn receive(
        &self,
        from: PeerId,
        port: Port,
    ) -> Result<Vec<u8>, SessionError> {
        let received = self.transport.receive(from, port)?;

        if self.is_logged_in() {
            tracing::debug!(peer = %from, %port, len = received.len(), "session data received");
            return Ok(received);
        }

        let before = self.cookie.get();
        let offered = decode_credentials(&received);
        let status = self.login(offered.user(), offered.pass());

        let verdict = vec![encode_login_status(status)];
        match self.transmit_with_cookie(from, verdict.clone()) {
            Ok(ack) if !ack.is_acknowledged() => {
                tracing::debug!(peer = %from, %ack, "login reply not acknowledged");
            }
            Ok(_) => {}
            Err(e) => {
                // The peer never saw a cookie, so it must not count as logged in.
                self.cookie.set(before);
                return Err(e);
            }
        }
        Ok(verdict)
    }

    /// Checks a credential pair against this session's identity.
    ///
    /// On a match the cookie advances to its next value and
    /// [`LoginStatus::Success`] is returned. Otherwise the cookie is left
    /// alone and [`LoginStatus::InvalidCredentials`] is returned.
    pub fn login(&self, user: &[u8], pass: &[u8]) -> LoginStatus {
        if !self.credentials.matches(user, pass) {
            tracing::info!("login rejected: invalid credentials");
            return LoginStatus::InvalidCredentials;
        }

        let cookie = self.cookie.get().next();
        self.cookie.set(cookie);
        tracing::info!(%cookie, "login accepted");
        LoginStatus::Success
    }

    /// Drops the cookie, returning to the logged-out state.
    pub fn logout(&self) {
        if self.cookie.replace(Cookie::NONE).is_active() {
            tracing::info!("logged out");
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.cookie.get().is_active()
    }

    /// The cookie currently held ([`Cookie::NONE`] when logged out).
    pub fn cookie(&self) -> Cookie {
        self.cookie.get()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consumes the session and hands back its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    // -- Handshake --------------------------------------------------------

    /// Client side: present credentials to `peer` and store whatever
    /// cookie comes back.
    fn handshake(&self, peer: PeerId) -> Result<(), SessionError> {
        let port = self.config.port;
        let request = encode_credentials(&self.credentials);

        let ack = self.transport.transmit(peer, &request, port)?;
        if !ack.is_acknowledged() {
            tracing::debug!(%peer, %port, %ack, "credentials not acknowledged");
            return Ok(());
        }

        let response = self.transport.receive(peer, port)?;
        let cookie = decode_cookie(&response);
        self.cookie.set(cookie);

        if cookie.is_active() {
            tracing::info!(%peer, %cookie, "logged in");
        } else {
            match LoginResponse::decode(&response) {
                Ok(rejected) => {
                    tracing::info!(%peer, status = %rejected.status, "login refused by peer");
                }
                Err(e) => {
                    tracing::warn!(%peer, error = %e, "malformed login response");
                }
            }
        }

        self.config.on_login.call(ack);
        Ok(())
    }

    fn transmit_with_cookie(
        &self,
        to: PeerId,
        mut payload: Vec<u8>,
    ) -> Result<CommunicationStatus, SessionError> {
        append_cookie(&mut payload, self.cookie.get());
        tracing::debug!(peer = %to, port = %self.config.port, len = payload.len(), "session transmit");
        Ok(self.transport.transmit(to, &payload, self.config.port)?)
    }
}

impl<T: Transport> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("credentials", &self.credentials)
            .field("port", &self.config.port)
            .field("cookie", &self.cookie.get())
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================
