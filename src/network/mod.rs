//! Network Layer
//!
//! WebSocket relay for real-time world synchronization. The transport and
//! framing live in `server`; every decoded message is reconciled against
//! the shared session in `engine`.

pub mod protocol;
pub mod registry;
pub mod snapshot;
pub mod engine;
pub mod server;

pub use protocol::{ClientMessage, ServerMessage, RenderUpdate, EntityKind};
pub use registry::{ConnectionId, ConnectionRegistry};
pub use engine::Engine;
pub use server::{RelayServer, ServerConfig, RelayServerError};
