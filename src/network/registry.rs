//! Connection Registry
//!
//! Tracks every live connection and the at-most-one player identity bound
//! to it, and owns the broadcast fan-out. Each connection carries a bounded
//! mpsc queue drained by its writer task; delivery here is `try_send`, so
//! fan-out never awaits and a slow consumer only loses its own messages.

use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::network::protocol::ServerMessage;

/// Outbound queue depth per connection. Messages beyond this are dropped
/// for that recipient (DeliveryFailure), never queued against the relay.
pub const OUTBOUND_QUEUE_DEPTH: usize = 256;

/// Opaque handle for a live transport session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered connection.
#[derive(Debug)]
struct Connection {
    /// Bound player identity, if a character was registered.
    player_id: Option<String>,
    /// Outbound queue to this connection's writer task.
    sender: mpsc::Sender<ServerMessage>,
}

/// Registry of live connections.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh handle with no bound player identity.
    pub fn register(&mut self, id: ConnectionId, sender: mpsc::Sender<ServerMessage>) {
        self.connections.insert(id, Connection { player_id: None, sender });
    }

    /// Bind a player identity to a connection, replacing any prior binding.
    pub fn bind(&mut self, id: ConnectionId, player_id: String) {
        if let Some(conn) = self.connections.get_mut(&id) {
            conn.player_id = Some(player_id);
        }
    }

    /// Player identity bound to a connection, if any.
    pub fn player_id(&self, id: ConnectionId) -> Option<&str> {
        self.connections.get(&id)?.player_id.as_deref()
    }

    /// Remove a handle, returning the player identity it was bound to.
    /// Idempotent: an already-removed handle is a no-op returning `None`.
    pub fn unbind_and_remove(&mut self, id: ConnectionId) -> Option<String> {
        self.connections.remove(&id)?.player_id
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether there are no live connections.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Deliver to one connection. Failures are per-recipient: logged and
    /// swallowed, never surfaced to the message that caused the send.
    pub fn send_to(&self, id: ConnectionId, msg: &ServerMessage) {
        if let Some(conn) = self.connections.get(&id) {
            if let Err(e) = conn.sender.try_send(msg.clone()) {
                debug!("dropping message for connection {}: {}", id, e);
            }
        }
    }

    /// Deliver to every live connection.
    pub fn broadcast(&self, msg: &ServerMessage) {
        for (id, conn) in &self.connections {
            if let Err(e) = conn.sender.try_send(msg.clone()) {
                debug!("dropping broadcast for connection {}: {}", id, e);
            }
        }
    }

    /// Deliver to every live connection except the sender.
    pub fn broadcast_except(&self, sender_id: ConnectionId, msg: &ServerMessage) {
        for (id, conn) in &self.connections {
            if *id == sender_id {
                continue;
            }
            if let Err(e) = conn.sender.try_send(msg.clone()) {
                debug!("dropping broadcast for connection {}: {}", id, e);
            }
        }
    }
}
