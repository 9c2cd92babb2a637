//! Player Character Store
//!
//! Live character state for every connected player. Entries follow the
//! connection lifecycle: created when a connection registers a character,
//! removed when that connection closes.
//!
//! Movement updates are partial: position and rotation are always replaced,
//! but speed and the falling flag only change when the client actually sent
//! them. "Field omitted" and "field sent as zero/false" are different things
//! on this wire, so the update path takes `Option`s.

use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use crate::world::transform::{Position, Rotation};

/// Metadata key clients use for the display name.
pub const META_PLAYER_NAME: &str = "playerName";

/// Stored state of a player character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Last-known position.
    pub position: Position,
    /// Last-known rotation.
    pub rotation: Rotation,
    /// Scalar movement speed.
    pub speed: f64,
    /// Whether the character is airborne.
    #[serde(rename = "isFalling")]
    pub is_falling: bool,
    /// Free-form client metadata (may carry "playerName").
    pub meta: Map<String, Value>,
}

/// Store of player characters, keyed by player id.
#[derive(Debug, Default)]
pub struct PlayerStore {
    entries: HashMap<String, PlayerState>,
    /// Insertion order, for stable snapshots within a session.
    order: Vec<String>,
}

impl PlayerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a character with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Get a character's state.
    pub fn get(&self, id: &str) -> Option<&PlayerState> {
        self.entries.get(id)
    }

    /// Create a fresh character: speed 0, not falling, metadata copied from
    /// the request. A display name supplied alongside the metadata is merged
    /// in if the metadata itself lacks one; an already-present name wins.
    /// Returns the stored state for the add broadcast.
    pub fn create(
        &mut self,
        id: &str,
        position: Position,
        rotation: Rotation,
        meta: Map<String, Value>,
        display_name: Option<String>,
    ) -> PlayerState {
        let mut meta = meta;
        if let Some(name) = display_name {
            meta.entry(META_PLAYER_NAME.to_string())
                .or_insert(Value::String(name));
        }

        let state = PlayerState {
            position,
            rotation,
            speed: 0.0,
            is_falling: false,
            meta,
        };

        if self.entries.insert(id.to_string(), state.clone()).is_none() {
            self.order.push(id.to_string());
        }
        state
    }

    /// Partial movement update. Position and rotation are overwritten
    /// unconditionally; speed and falling only when the caller supplied a
    /// value. Returns the full updated state for broadcasting, or `None`
    /// when the id is unknown (the character is never auto-created).
    pub fn update_transform(
        &mut self,
        id: &str,
        position: Position,
        rotation: Rotation,
        speed: Option<f64>,
        is_falling: Option<bool>,
    ) -> Option<PlayerState> {
        let player = self.entries.get_mut(id)?;
        player.position = position;
        player.rotation = rotation;
        if let Some(speed) = speed {
            player.speed = speed;
        }
        if let Some(falling) = is_falling {
            player.is_falling = falling;
        }
        Some(player.clone())
    }

    /// Remove a character. Returns false when the id was already absent.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.entries.remove(id).is_some() {
            self.order.retain(|o| o != id);
            true
        } else {
            false
        }
    }

    /// Display name from metadata, if one was set.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.entries
            .get(id)?
            .meta
            .get(META_PLAYER_NAME)?
            .as_str()
    }

    /// Number of live characters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full dump in insertion order.
    pub fn snapshot(&self) -> Vec<(String, PlayerState)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|s| (id.clone(), s.clone())))
            .collect()
    }
}
