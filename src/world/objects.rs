//! World Object Store
//!
//! Last-known transform for every static world object, keyed by the
//! client-assigned object id. The id set only grows: objects are registered
//! once (batch seed or first individual update) and thereafter only moved,
//! never removed, for the lifetime of the process.
//!
//! The store also owns the world-init flag: the world geometry is seeded by
//! exactly one `register_batch`, every later batch is a no-op.

use std::collections::HashMap;
use serde::{Serialize, Deserialize};

use crate::world::transform::{Position, Rotation};

/// Stored state of a single world object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    /// Last-known position.
    pub position: Position,
    /// Last-known rotation.
    pub rotation: Rotation,
}

impl ObjectState {
    /// Create object state from a transform.
    pub fn new(position: Position, rotation: Rotation) -> Self {
        Self { position, rotation }
    }
}

/// Append-only store of world objects.
#[derive(Debug, Default)]
pub struct WorldObjectStore {
    entries: HashMap<String, ObjectState>,
    /// Insertion order, for stable snapshots within a session.
    order: Vec<String>,
    initialized: bool,
}

impl WorldObjectStore {
    /// Create an empty, uninitialized store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the one-time batch registration has been accepted.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Latch the world-init flag. Irreversible.
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Whether an object with this id is known.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Get an object's state.
    pub fn get(&self, id: &str) -> Option<&ObjectState> {
        self.entries.get(id)
    }

    /// Insert if absent. Returns true when the object was newly inserted;
    /// an existing entry is left untouched. The return value drives the
    /// add-vs-update broadcast decision, so the caller must hold the store
    /// exclusively across insert and broadcast.
    pub fn insert_or_get(&mut self, id: &str, state: ObjectState) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.order.push(id.to_string());
        self.entries.insert(id.to_string(), state);
        true
    }

    /// Batch-seed insert: overwrites the value if the id repeats within the
    /// batch, keeping the first-seen position in the snapshot order.
    pub fn seed(&mut self, id: &str, state: ObjectState) {
        if self.entries.insert(id.to_string(), state).is_none() {
            self.order.push(id.to_string());
        }
    }

    /// Overwrite position and rotation of an existing object. Returns false
    /// if the id is unknown; other stored fields are never touched.
    pub fn update_transform(&mut self, id: &str, position: Position, rotation: Rotation) -> bool {
        match self.entries.get_mut(id) {
            Some(obj) => {
                obj.position = position;
                obj.rotation = rotation;
                true
            }
            None => false,
        }
    }

    /// Number of known objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full dump in insertion order.
    pub fn snapshot(&self) -> Vec<(String, ObjectState)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|s| (id.clone(), s.clone())))
            .collect()
    }
}
