//! Loopback demo: a client and a server session on one `MemoryNetwork`.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=debug cargo run -p loopback [identity.json]
//! ```
//!
//! The optional JSON file holds `{ "user", "pass", "port" }` and is used by
//! both sides. Without it a built-in identity is used. Set
//! `LOOPBACK_SERVER_PASS` to give the server a different password and watch
//! the handshake fail.

use std::thread;

use osistack::prelude::*;
use tracing_subscriber::EnvFilter;

const CLIENT: PeerId = PeerId(1);
const SERVER: PeerId = PeerId(2);

const MESSAGES: [&str; 3] = ["hello", "from", "the session layer"];

fn main() -> Result<(), OsiError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let identity = match std::env::args().nth(1) {
        Some(path) => IdentityConfig::from_json_file(path)?,
        None => IdentityConfig {
            user: "abcd".into(),
            pass: "1234".into(),
            port: 7,
        },
    };

    let mut server_identity = identity.clone();
    if let Ok(pass) = std::env::var("LOOPBACK_SERVER_PASS") {
        server_identity.pass = pass;
    }

    let net = MemoryNetwork::new();

    let (credentials, config) = server_identity.into_parts();
    let port = config.port;
    let server = Session::new(net.endpoint(SERVER), credentials, config);

    let (credentials, config) = identity.into_parts();
    let config = config.with_on_login(|status| {
        tracing::info!(%status, "client login attempt completed");
    });
    let client = Session::new(net.endpoint(CLIENT), credentials, config);

    let server = thread::spawn(move || -> Result<(), OsiError> {
        let verdict = server.receive(CLIENT, port)?;
        let status = verdict
            .first()
            .copied()
            .map(CommunicationStatus::from_byte)
            .unwrap_or_default();
        tracing::info!(%status, cookie = %server.cookie(), "server answered login");
        if !server.is_logged_in() {
            return Ok(());
        }

        for _ in MESSAGES {
            let data = server.receive(CLIENT, port)?;
            tracing::info!(
                message = %String::from_utf8_lossy(&data),
                len = data.len(),
                "server received"
            );
        }
        Ok(())
    });

    let mut outcome = Ok(());
    for message in MESSAGES {
        if let Err(e) = client.transmit(SERVER, message.as_bytes()) {
            tracing::error!(error = %e, status = %e.status(), "transmit failed");
            outcome = Err(e.into());
            break;
        }
    }

    match server.join() {
        Ok(result) => result?,
        Err(_) => tracing::error!("server thread panicked"),
    }
    outcome
}
