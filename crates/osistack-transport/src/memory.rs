//! In-process transport backed by `tokio` channels.
//!
//! A [`MemoryNetwork`] is a hub that any number of [`MemoryTransport`]
//! endpoints attach to. Every `(destination, source, port)` triple gets its
//! own FIFO mailbox, so a peer reading from one sender never sees another
//! sender's messages.
//!
//! `receive` blocks the calling thread with `blocking_recv`. Call it from
//! plain threads, never from inside an async runtime.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{CommunicationStatus, PeerId, Port, Transport, TransportError};

/// Destination, source, port.
type MailboxKey = (PeerId, PeerId, Port);

struct Mailbox {
    tx: UnboundedSender<Vec<u8>>,
    rx: Arc<Mutex<UnboundedReceiver<Vec<u8>>>>,
}

impl Mailbox {
    fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }
}

#[derive(Default)]
struct Inner {
    endpoints: Mutex<HashSet<PeerId>>,
    mailboxes: Mutex<HashMap<MailboxKey, Mailbox>>,
}

/// Shared hub connecting in-memory endpoints.
///
/// Cloning is cheap; clones refer to the same network.
#[derive(Clone, Default)]
pub struct MemoryNetwork {
    inner: Arc<Inner>,
}

impl MemoryNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` and returns its endpoint.
    ///
    /// Registering the same id twice yields two handles that share the
    /// same mailboxes.
    pub fn endpoint(&self, id: PeerId) -> MemoryTransport {
        lock(&self.inner.endpoints).insert(id);
        tracing::debug!(peer = %id, "memory endpoint registered");
        MemoryTransport {
            id,
            network: self.clone(),
            acknowledgement: CommunicationStatus::Acknowledge,
        }
    }

    fn is_registered(&self, id: PeerId) -> bool {
        lock(&self.inner.endpoints).contains(&id)
    }

    fn sender(&self, key: MailboxKey) -> UnboundedSender<Vec<u8>> {
        lock(&self.inner.mailboxes)
            .entry(key)
            .or_insert_with(Mailbox::new)
            .tx
            .clone()
    }

    fn receiver(
        &self,
        key: MailboxKey,
    ) -> Arc<Mutex<UnboundedReceiver<Vec<u8>>>> {
        // The map lock is released before the caller blocks on the channel.
        Arc::clone(
            &lock(&self.inner.mailboxes)
                .entry(key)
                .or_insert_with(Mailbox::new)
                .rx,
        )
    }
}

/// One peer's view of a [`MemoryNetwork`].
#[derive(Clone)]
pub struct MemoryTransport {
    id: PeerId,
    network: MemoryNetwork,
    acknowledgement: CommunicationStatus,
}

impl MemoryTransport {
    /// The peer id this endpoint was registered under.
    pub fn id(&self) -> PeerId {
        self.id
    }

    /// Sets the status every successful `transmit` reports.
    pub fn with_acknowledgement(mut self, status: CommunicationStatus) -> Self {
        self.acknowledgement = status;
        self
    }

    /// Takes the next message from `from` on `port` without blocking.
    pub fn try_receive(&self, from: PeerId, port: Port) -> Option<Vec<u8>> {
        let rx = self.network.receiver((self.id, from, port));
        let mut rx = lock(&rx);
        rx.try_recv().ok()
    }
}

impl Transport for MemoryTransport {
    fn transmit(
        &self,
        to: PeerId,
        data: &[u8],
        port: Port,
    ) -> Result<CommunicationStatus, TransportError> {
        if !self.network.is_registered(to) {
            return Err(TransportError::Unreachable(to));
        }

        tracing::debug!(from = %self.id, %to, %port, len = data.len(), "memory transmit");
        self.network
            .sender((to, self.id, port))
            .send(data.to_vec())
            .map_err(|_| TransportError::Closed { peer: to, port })?;

        Ok(self.acknowledgement)
    }

    /// Blocks until `from` sends on `port`.
    ///
    /// Fails with [`TransportError::Unreachable`] if `from` never
    /// registered, mirroring `transmit`. A registered peer that never sends
    /// blocks the caller indefinitely.
    fn receive(
        &self,
        from: PeerId,
        port: Port,
    ) -> Result<Vec<u8>, TransportError> {
        if !self.network.is_registered(from) {
            return Err(TransportError::Unreachable(from));
        }

        let rx = self.network.receiver((self.id, from, port));
        let mut rx = lock(&rx);
        let data = rx
            .blocking_recv()
            .ok_or(TransportError::Closed { peer: from, port })?;

        tracing::debug!(to = %self.id, %from, %port, len = data.len(), "memory receive");
        Ok(data)
    }
}

/// Locks a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    const A: PeerId = PeerId(1);
    const B: PeerId = PeerId(2);
    const PORT: Port = Port(7);

    #[test]
    fn test_transmit_then_receive_delivers_bytes() {
        let net = MemoryNetwork::new();
        let a = net.endpoint(A);
        let b = net.endpoint(B);

        let status = a.transmit(B, b"hello", PORT).unwrap();

        assert_eq!(status, CommunicationStatus::Acknowledge);
        assert_eq!(b.receive(A, PORT).unwrap(), b"hello");
    }

    #[test]
    fn test_transmit_to_unregistered_peer_is_unreachable() {
        let net = MemoryNetwork::new();
        let a = net.endpoint(A);

        let result = a.transmit(PeerId(99), b"x", PORT);

        assert!(matches!(
            result,
            Err(TransportError::Unreachable(PeerId(99)))
        ));
    }

    #[test]
    fn test_receive_from_unregistered_peer_is_unreachable() {
        let net = MemoryNetwork::new();
        let b = net.endpoint(B);

        let result = b.receive(PeerId(99), PORT);

        assert!(matches!(
            result,
            Err(TransportError::Unreachable(PeerId(99)))
        ));
    }

    #[test]
    fn test_mailboxes_are_separated_by_port_and_source() {
        let net = MemoryNetwork::new();
        let a = net.endpoint(A);
        let b = net.endpoint(B);
        let c = net.endpoint(PeerId(3));

        a.transmit(B, b"from-a-port-7", PORT).unwrap();
        a.transmit(B, b"from-a-port-8", Port(8)).unwrap();
        c.transmit(B, b"from-c", PORT).unwrap();

        assert_eq!(b.try_receive(A, Port(8)).unwrap(), b"from-a-port-8");
        assert_eq!(b.try_receive(PeerId(3), PORT).unwrap(), b"from-c");
        assert_eq!(b.try_receive(A, PORT).unwrap(), b"from-a-port-7");
        assert!(b.try_receive(A, PORT).is_none());
    }

    #[test]
    fn test_messages_arrive_in_send_order() {
        let net = MemoryNetwork::new();
        let a = net.endpoint(A);
        let b = net.endpoint(B);

        for i in 0..5u8 {
            a.transmit(B, &[i], PORT).unwrap();
        }

        let received: Vec<u8> =
            (0..5).map(|_| b.receive(A, PORT).unwrap()[0]).collect();
        assert_eq!(received, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_with_acknowledgement_overrides_status() {
        let net = MemoryNetwork::new();
        let a = net
            .endpoint(A)
            .with_acknowledgement(CommunicationStatus::NoAcknowledgeRequired);
        net.endpoint(B);

        let status = a.transmit(B, b"x", PORT).unwrap();

        assert_eq!(status, CommunicationStatus::NoAcknowledgeRequired);
    }

    #[test]
    fn test_receive_blocks_until_message_arrives() {
        let net = MemoryNetwork::new();
        let a = net.endpoint(A);
        let b = net.endpoint(B);

        let reader = thread::spawn(move || b.receive(A, PORT).unwrap());
        thread::sleep(std::time::Duration::from_millis(20));
        a.transmit(B, b"late", PORT).unwrap();

        assert_eq!(reader.join().unwrap(), b"late");
    }
}
