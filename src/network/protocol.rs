//! Protocol Messages
//!
//! Wire format for client-server communication over WebSocket.
//! All messages are JSON; field names match what the deployed game clients
//! send (camelCase keys via serde renames), so the shapes here are the
//! contract and must not drift.

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use crate::world::objects::ObjectState;
use crate::world::players::PlayerState;
use crate::world::transform::{Position, Rotation};

// =============================================================================
// CLIENT -> SERVER MESSAGES
// =============================================================================

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// One-time seeding of the world geometry.
    RegisterBatch {
        /// Objects to register; entries without an id are skipped.
        #[serde(default)]
        objects: Vec<RawBatchObject>,
    },

    /// Register this connection's player character.
    RegisterCharacter(RegisterCharacter),

    /// Structured state update for a world object or player.
    Update(EntityUpdate),

    /// Flat transform update, resolved by id to a player or world object.
    Transform(TransformUpdate),

    /// Chat line from a player.
    Chat {
        /// Sender's player id.
        #[serde(rename = "playerID")]
        player_id: String,
        /// Message text.
        #[serde(default)]
        message: String,
    },

    /// Request a full state snapshot (resync).
    RequestState,

    /// Any message kind this server does not know. Ignored, so newer
    /// clients can talk to older servers.
    #[serde(other)]
    Unknown,
}

/// A world object as supplied in a `register_batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBatchObject {
    /// Object identifier; entries without one are dropped.
    #[serde(rename = "objectID", default)]
    pub object_id: Option<String>,
    /// Initial position.
    #[serde(default)]
    pub position: Position,
    /// Initial rotation.
    #[serde(default)]
    pub rotation: Rotation,
}

/// Payload of `register_character`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCharacter {
    /// Requested player id; the server generates one when absent.
    #[serde(rename = "playerID", default)]
    pub player_id: Option<String>,
    /// Spawn position.
    #[serde(default)]
    pub position: Position,
    /// Spawn rotation.
    #[serde(default)]
    pub rotation: Rotation,
    /// Free-form metadata (may carry "playerName").
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}

/// Which top-level collection an `update` targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Static world object.
    World,
    /// Player character.
    Player,
}

/// Payload of a structured `update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityUpdate {
    /// Target collection.
    #[serde(rename = "entityType")]
    pub entity_type: EntityKind,
    /// Entity identifier.
    pub id: String,
    /// New state (speed/falling optional for players).
    pub state: UpdateState,
    /// Set by clients on the world-object path.
    #[serde(rename = "isObject", default)]
    pub is_object: bool,
}

/// Inbound entity state. Speed and the falling flag distinguish "not sent"
/// from "sent as zero/false": an omitted field keeps the stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateState {
    /// New position.
    #[serde(default)]
    pub position: Position,
    /// New rotation.
    #[serde(default)]
    pub rotation: Rotation,
    /// New speed, if sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// New falling flag, if sent.
    #[serde(rename = "isFalling", default, skip_serializing_if = "Option::is_none")]
    pub is_falling: Option<bool>,
}

/// Payload of a flat `transform` message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformUpdate {
    /// Entity identifier (player or world object).
    pub id: String,
    /// Position X.
    #[serde(default)]
    pub x: f64,
    /// Position Y.
    #[serde(default)]
    pub y: f64,
    /// Position Z.
    #[serde(default)]
    pub z: f64,
    /// Rotation pitch.
    #[serde(default)]
    pub pitch: f64,
    /// Rotation yaw.
    #[serde(default)]
    pub yaw: f64,
    /// Rotation roll.
    #[serde(default)]
    pub roll: f64,
    /// New speed, if sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// New falling flag, if sent.
    #[serde(rename = "isFalling", default, skip_serializing_if = "Option::is_none")]
    pub is_falling: Option<bool>,
}

impl TransformUpdate {
    /// Position components as a `Position`.
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    /// Rotation components as a `Rotation`.
    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.pitch, self.yaw, self.roll)
    }
}

// =============================================================================
// SERVER -> CLIENT MESSAGES
// =============================================================================

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full state snapshot, sent on connect and on `request_state`.
    StateSync {
        /// Whether the world batch has been seeded.
        initialized: bool,
        /// All world objects, in registration order.
        #[serde(rename = "worldObjects")]
        world_objects: Vec<WorldObjectEntry>,
        /// All player characters, in join order.
        #[serde(rename = "playerCharacters")]
        player_characters: Vec<PlayerEntry>,
    },

    /// Direct reply carrying the player id assigned at registration.
    Id {
        /// Assigned player id.
        id: String,
    },

    /// Incremental world event fanned out to clients.
    RenderUpdate(RenderUpdate),
}

/// A world object in a `state_sync`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObjectEntry {
    /// Object identifier.
    #[serde(rename = "objectID")]
    pub object_id: String,
    /// Stored state.
    pub state: ObjectState,
}

/// A player character in a `state_sync`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Player identifier.
    #[serde(rename = "playerID")]
    pub player_id: String,
    /// Stored state.
    pub state: PlayerState,
}

/// A world object in an `add_batch` event (state flattened next to the id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchObject {
    /// Object identifier.
    #[serde(rename = "objectID")]
    pub object_id: String,
    /// Position.
    pub position: Position,
    /// Rotation.
    pub rotation: Rotation,
}

/// Render events. Serialized flat into the `render_update` envelope, with
/// the variant in an `action` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RenderUpdate {
    /// The one-time world seed: every registered object.
    AddBatch {
        /// All world objects.
        objects: Vec<BatchObject>,
    },

    /// A player character joined.
    AddCharacter {
        /// Player identifier.
        #[serde(rename = "playerID")]
        player_id: String,
        /// Initial state.
        state: PlayerState,
    },

    /// A world object appeared outside the batch (late-arriving update).
    AddObject {
        /// Object identifier.
        id: String,
        /// Initial state.
        state: ObjectState,
        /// Always true; kept for client-side routing.
        #[serde(rename = "isObject")]
        is_object: bool,
    },

    /// An existing entity moved (structured update path).
    Update {
        /// Target collection.
        #[serde(rename = "entityType")]
        entity_type: EntityKind,
        /// Entity identifier.
        id: String,
        /// Full updated state.
        state: EntityState,
        /// Present on the structured world-object path.
        #[serde(rename = "isObject", skip_serializing_if = "Option::is_none")]
        is_object: Option<bool>,
    },

    /// A player moved (flat transform path).
    Transform {
        /// Player identifier.
        #[serde(rename = "playerID")]
        player_id: String,
        /// Full updated state.
        state: PlayerState,
    },

    /// A chat line. `playerID` carries the resolved display name, falling
    /// back to the raw id when no name was set.
    NewChat {
        /// Display name or raw player id.
        #[serde(rename = "playerID")]
        player_id: String,
        /// Message text.
        message: String,
    },

    /// A player character left.
    RemoveCharacter {
        /// Player identifier.
        #[serde(rename = "playerID")]
        player_id: String,
    },
}

/// Full entity state inside an `update` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityState {
    /// Player character state.
    Player(PlayerState),
    /// World object state.
    Object(ObjectState),
}

// =============================================================================
// SERIALIZATION HELPERS
// =============================================================================

impl ClientMessage {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Deserialize from raw bytes (binary WebSocket frames carrying JSON).
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

impl ServerMessage {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
