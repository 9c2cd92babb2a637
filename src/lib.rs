//! # World Relay Server
//!
//! Authoritative relay for a shared multiplayer world. Holds the in-memory
//! truth for static world objects and live player characters, and fans
//! state changes out to every connected client over WebSocket.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    WORLD RELAY SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  world/          - Shared session state (pure, no I/O)      │
//! │  ├── transform.rs- Position/rotation primitives             │
//! │  ├── objects.rs  - World-object store + one-time init flag  │
//! │  └── players.rs  - Player-character store (partial updates) │
//! │                                                             │
//! │  network/        - WebSocket relay                          │
//! │  ├── protocol.rs - JSON wire messages                       │
//! │  ├── registry.rs - Connection registry + broadcast fan-out  │
//! │  ├── snapshot.rs - Full state_sync for late joiners         │
//! │  ├── engine.rs   - Reconciliation engine (merge + fan-out)  │
//! │  └── server.rs   - Accept loop, per-connection tasks        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Guarantee
//!
//! Every mutation and the broadcast decision it drives run under a single
//! write lock over the session, so add-vs-update choices are atomic per
//! entity and a late joiner's snapshot never straddles a concurrent write.
//! Delivery is decoupled: each connection drains its own bounded queue, so
//! one slow socket never stalls the rest of the world.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod world;
pub mod network;

// Re-export commonly used types
pub use world::{Position, Rotation, ObjectState, PlayerState, WorldObjectStore, PlayerStore};
pub use network::{ClientMessage, ServerMessage, Engine, RelayServer, ServerConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
