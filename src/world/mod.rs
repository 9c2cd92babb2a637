//! World State
//!
//! Shared in-memory truth for the session. Pure data, no I/O: the network
//! layer decides when these stores change and who hears about it.
//!
//! - `transform`: position/rotation primitives
//! - `objects`: world-object store and the one-time init flag
//! - `players`: player-character store with partial-update semantics

pub mod transform;
pub mod objects;
pub mod players;

pub use transform::{Position, Rotation};
pub use objects::{ObjectState, WorldObjectStore};
pub use players::{PlayerState, PlayerStore, META_PLAYER_NAME};
