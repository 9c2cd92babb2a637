//! Snapshot Producer
//!
//! Builds the full-state `state_sync` message sent to a connecting or
//! resynchronizing client. Callers invoke this under the same lock that
//! serializes mutations, so a late joiner sees a point-in-time view that
//! no concurrent write can straddle.

use crate::network::protocol::{PlayerEntry, ServerMessage, WorldObjectEntry};
use crate::world::objects::WorldObjectStore;
use crate::world::players::PlayerStore;

/// Produce a full snapshot of the session: init flag plus both stores,
/// each in insertion order.
pub fn state_sync(objects: &WorldObjectStore, players: &PlayerStore) -> ServerMessage {
    ServerMessage::StateSync {
        initialized: objects.is_initialized(),
        world_objects: objects
            .snapshot()
            .into_iter()
            .map(|(object_id, state)| WorldObjectEntry { object_id, state })
            .collect(),
        player_characters: players
            .snapshot()
            .into_iter()
            .map(|(player_id, state)| PlayerEntry { player_id, state })
            .collect(),
    }
}
