//! Reconciliation Engine
//!
//! The heart of the relay: merges each decoded client message into the
//! shared session state and decides what gets broadcast to whom. The engine
//! itself is a stateless dispatcher; all state lives in the registry and
//! the two stores, held together behind one `RwLock`.
//!
//! Every mutation runs its full read-decide-write sequence, including the
//! broadcast enqueue, under a single write guard. That keeps decisions like
//! "newly inserted, so broadcast add rather than update" atomic per entity:
//! two near-simultaneous first updates to the same id can never both see an
//! empty slot. Fan-out is enqueue-only (`try_send`), so holding the guard
//! across it never waits on a slow socket.

use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn, debug};
use uuid::Uuid;

use crate::network::protocol::{
    BatchObject, ClientMessage, EntityKind, EntityState, EntityUpdate, RawBatchObject,
    RegisterCharacter, RenderUpdate, ServerMessage, TransformUpdate,
};
use crate::network::registry::{ConnectionId, ConnectionRegistry};
use crate::network::snapshot;
use crate::world::objects::{ObjectState, WorldObjectStore};
use crate::world::players::{PlayerStore, META_PLAYER_NAME};

/// Shared session state: everything the engine reconciles against.
/// Born empty at process start, never persisted.
#[derive(Debug, Default)]
struct WorldSession {
    registry: ConnectionRegistry,
    objects: WorldObjectStore,
    players: PlayerStore,
}

/// The reconciliation engine. One per process; cheap to share via `Arc`.
#[derive(Debug, Default)]
pub struct Engine {
    session: RwLock<WorldSession>,
}

impl Engine {
    /// Create an engine over an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport accept: register the handle and reply with a full
    /// snapshot so a late joiner starts from current truth.
    pub async fn on_connect(&self, id: ConnectionId, sender: mpsc::Sender<ServerMessage>) {
        let mut session = self.session.write().await;
        session.registry.register(id, sender);
        let sync = snapshot::state_sync(&session.objects, &session.players);
        session.registry.send_to(id, &sync);
    }

    /// Transport close: drop the handle and, if a character was bound,
    /// remove it and tell everyone who is left.
    pub async fn on_disconnect(&self, id: ConnectionId) {
        let mut session = self.session.write().await;
        let Some(player_id) = session.registry.unbind_and_remove(id) else {
            return;
        };
        if session.players.remove(&player_id) {
            info!("player {} removed on disconnect", player_id);
            session.registry.broadcast(&ServerMessage::RenderUpdate(
                RenderUpdate::RemoveCharacter { player_id },
            ));
        }
    }

    /// Dispatch a decoded message from a connection.
    pub async fn on_message(&self, id: ConnectionId, msg: ClientMessage) {
        let mut session = self.session.write().await;
        match msg {
            ClientMessage::RegisterBatch { objects } => session.register_batch(objects),
            ClientMessage::RegisterCharacter(reg) => session.register_character(id, reg),
            ClientMessage::Update(update) => session.update_entity(id, update),
            ClientMessage::Transform(transform) => session.transform_entity(id, transform),
            ClientMessage::Chat { player_id, message } => session.chat(player_id, message),
            ClientMessage::RequestState => {
                let sync = snapshot::state_sync(&session.objects, &session.players);
                session.registry.send_to(id, &sync);
            }
            ClientMessage::Unknown => {
                debug!("ignoring unknown message kind from connection {}", id);
            }
        }
    }

    /// Number of live connections.
    pub async fn connection_count(&self) -> usize {
        self.session.read().await.registry.len()
    }
}

impl WorldSession {
    /// One-time world seed. Every batch after the first is a no-op.
    fn register_batch(&mut self, objects: Vec<RawBatchObject>) {
        if self.objects.is_initialized() {
            debug!("ignoring register_batch: world already initialized");
            return;
        }

        for obj in objects {
            let Some(object_id) = obj.object_id else {
                continue;
            };
            self.objects
                .seed(&object_id, ObjectState::new(obj.position, obj.rotation));
        }
        self.objects.mark_initialized();
        info!("world initialized with {} objects", self.objects.len());

        let objects = self
            .objects
            .snapshot()
            .into_iter()
            .map(|(object_id, state)| BatchObject {
                object_id,
                position: state.position,
                rotation: state.rotation,
            })
            .collect();
        self.registry
            .broadcast(&ServerMessage::RenderUpdate(RenderUpdate::AddBatch { objects }));
    }

    /// Bind a character to the connection, reply with its id, and announce
    /// it to everyone (the registering client included).
    fn register_character(&mut self, id: ConnectionId, reg: RegisterCharacter) {
        let player_id = reg
            .player_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.registry.bind(id, player_id.clone());
        self.registry
            .send_to(id, &ServerMessage::Id { id: player_id.clone() });

        let meta = reg.meta.unwrap_or_default();
        let display_name = meta
            .get(META_PLAYER_NAME)
            .and_then(|v| v.as_str())
            .map(String::from);
        let state = self
            .players
            .create(&player_id, reg.position, reg.rotation, meta, display_name);

        info!("character {} registered on connection {}", player_id, id);
        self.registry.broadcast(&ServerMessage::RenderUpdate(
            RenderUpdate::AddCharacter { player_id, state },
        ));
    }

    /// Structured update. World objects are auto-created on first sight;
    /// unknown player ids are dropped (a character only ever exists through
    /// register_character).
    fn update_entity(&mut self, sender: ConnectionId, update: EntityUpdate) {
        let EntityUpdate { entity_type, id, state, is_object } = update;

        match entity_type {
            EntityKind::World if is_object => {
                let object_state = ObjectState::new(state.position, state.rotation);
                if self.objects.insert_or_get(&id, object_state.clone()) {
                    info!(
                        "world object added: id={}, pos=({},{},{})",
                        id, state.position.x, state.position.y, state.position.z
                    );
                    self.registry.broadcast_except(
                        sender,
                        &ServerMessage::RenderUpdate(RenderUpdate::AddObject {
                            id,
                            state: object_state,
                            is_object: true,
                        }),
                    );
                } else {
                    self.objects.update_transform(&id, state.position, state.rotation);
                    info!(
                        "world object updated: id={}, pos=({},{},{})",
                        id, state.position.x, state.position.y, state.position.z
                    );
                    self.registry.broadcast_except(
                        sender,
                        &ServerMessage::RenderUpdate(RenderUpdate::Update {
                            entity_type: EntityKind::World,
                            id,
                            state: EntityState::Object(object_state),
                            is_object: Some(true),
                        }),
                    );
                }
            }
            EntityKind::Player => {
                let Some(updated) = self.players.update_transform(
                    &id,
                    state.position,
                    state.rotation,
                    state.speed,
                    state.is_falling,
                ) else {
                    debug!("ignoring update for unknown player {}", id);
                    return;
                };
                self.registry.broadcast_except(
                    sender,
                    &ServerMessage::RenderUpdate(RenderUpdate::Update {
                        entity_type: EntityKind::Player,
                        id,
                        state: EntityState::Player(updated),
                        is_object: None,
                    }),
                );
            }
            EntityKind::World => {
                debug!("ignoring world update without isObject for {}", id);
            }
        }
    }

    /// Flat transform, resolved by id: players first, then world objects.
    fn transform_entity(&mut self, sender: ConnectionId, transform: TransformUpdate) {
        let position = transform.position();
        let rotation = transform.rotation();

        if let Some(updated) = self.players.update_transform(
            &transform.id,
            position,
            rotation,
            transform.speed,
            transform.is_falling,
        ) {
            self.registry.broadcast_except(
                sender,
                &ServerMessage::RenderUpdate(RenderUpdate::Transform {
                    player_id: transform.id,
                    state: updated,
                }),
            );
        } else if self.objects.update_transform(&transform.id, position, rotation) {
            info!(
                "world object transform: id={}, pos=({},{},{})",
                transform.id, position.x, position.y, position.z
            );
            let state = self
                .objects
                .get(&transform.id)
                .cloned()
                .unwrap_or_default();
            self.registry.broadcast_except(
                sender,
                &ServerMessage::RenderUpdate(RenderUpdate::Update {
                    entity_type: EntityKind::World,
                    id: transform.id,
                    state: EntityState::Object(state),
                    is_object: None,
                }),
            );
        } else {
            warn!("transform for unknown id: {}", transform.id);
        }
    }

    /// Relay a chat line to everyone, with the sender's display name
    /// resolved (raw id when the character or name is missing).
    fn chat(&mut self, player_id: String, message: String) {
        let name = self
            .players
            .display_name(&player_id)
            .map(String::from)
            .unwrap_or_else(|| player_id.clone());

        self.registry.broadcast(&ServerMessage::RenderUpdate(RenderUpdate::NewChat {
            player_id: name,
            message,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::protocol::UpdateState;
    use crate::world::transform::{Position, Rotation};
    use serde_json::{Map, Value};

    /// Connect a client: registered handle plus a receiver for everything
    /// the engine sends it. The initial state_sync is left in the queue.
    async fn connect(engine: &Engine) -> (ConnectionId, mpsc::Receiver<ServerMessage>) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::channel(64);
        engine.on_connect(id, tx).await;
        (id, rx)
    }

    fn drain(rx: &mut mpsc::Receiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(msg);
        }
        out
    }

    fn batch_msg(ids: &[&str]) -> ClientMessage {
        ClientMessage::RegisterBatch {
            objects: ids
                .iter()
                .map(|id| RawBatchObject {
                    object_id: Some(id.to_string()),
                    position: Position::new(1.0, 2.0, 3.0),
                    rotation: Rotation::default(),
                })
                .collect(),
        }
    }

    fn register_msg(player_id: Option<&str>, name: Option<&str>) -> ClientMessage {
        let meta = name.map(|n| {
            let mut m = Map::new();
            m.insert(META_PLAYER_NAME.to_string(), Value::String(n.to_string()));
            m
        });
        ClientMessage::RegisterCharacter(RegisterCharacter {
            player_id: player_id.map(String::from),
            position: Position::default(),
            rotation: Rotation::default(),
            meta,
        })
    }

    fn player_update(id: &str, speed: Option<f64>) -> ClientMessage {
        ClientMessage::Update(EntityUpdate {
            entity_type: EntityKind::Player,
            id: id.to_string(),
            state: UpdateState {
                position: Position::new(9.0, 9.0, 9.0),
                rotation: Rotation::default(),
                speed,
                is_falling: None,
            },
            is_object: false,
        })
    }

    #[tokio::test]
    async fn test_connect_receives_snapshot() {
        let engine = Engine::new();
        let (_a, mut rx) = connect(&engine).await;

        match rx.try_recv().unwrap() {
            ServerMessage::StateSync { initialized, world_objects, player_characters } => {
                assert!(!initialized);
                assert!(world_objects.is_empty());
                assert!(player_characters.is_empty());
            }
            other => panic!("expected state_sync, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_batch_reaches_sender_too() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        engine.on_message(a, batch_msg(&["rock1"])).await;

        for rx in [&mut rx_a, &mut rx_b] {
            match rx.try_recv().unwrap() {
                ServerMessage::RenderUpdate(RenderUpdate::AddBatch { objects }) => {
                    assert_eq!(objects.len(), 1);
                    assert_eq!(objects[0].object_id, "rock1");
                    assert_eq!(objects[0].position, Position::new(1.0, 2.0, 3.0));
                }
                other => panic!("expected add_batch, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_second_batch_is_noop() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (b, mut rx_b) = connect(&engine).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        engine.on_message(a, batch_msg(&["rock1"])).await;
        engine.on_message(b, batch_msg(&["rock2"])).await;

        // Exactly one add_batch each, still containing only rock1
        for rx in [&mut rx_a, &mut rx_b] {
            let msgs = drain(rx);
            assert_eq!(msgs.len(), 1);
            match &msgs[0] {
                ServerMessage::RenderUpdate(RenderUpdate::AddBatch { objects }) => {
                    assert_eq!(objects.len(), 1);
                    assert_eq!(objects[0].object_id, "rock1");
                }
                other => panic!("expected add_batch, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_batch_skips_entries_without_id() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        drain(&mut rx_a);

        engine
            .on_message(
                a,
                ClientMessage::RegisterBatch {
                    objects: vec![
                        RawBatchObject {
                            object_id: None,
                            position: Position::default(),
                            rotation: Rotation::default(),
                        },
                        RawBatchObject {
                            object_id: Some("rock1".to_string()),
                            position: Position::default(),
                            rotation: Rotation::default(),
                        },
                    ],
                },
            )
            .await;

        match rx_a.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::AddBatch { objects }) => {
                assert_eq!(objects.len(), 1);
            }
            other => panic!("expected add_batch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_character_generates_id() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        engine.on_message(a, register_msg(None, Some("Alice"))).await;

        // Direct reply first: the assigned id
        let assigned = match rx_a.try_recv().unwrap() {
            ServerMessage::Id { id } => id,
            other => panic!("expected id reply, got {:?}", other),
        };
        assert!(!assigned.is_empty());

        // Everyone (including the registrant) sees add_character with defaults
        for rx in [&mut rx_a, &mut rx_b] {
            match rx.try_recv().unwrap() {
                ServerMessage::RenderUpdate(RenderUpdate::AddCharacter { player_id, state }) => {
                    assert_eq!(player_id, assigned);
                    assert_eq!(state.speed, 0.0);
                    assert!(!state.is_falling);
                    assert_eq!(state.meta.get(META_PLAYER_NAME).unwrap(), "Alice");
                }
                other => panic!("expected add_character, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_player_update_excludes_sender() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        engine.on_message(a, register_msg(Some("p1"), None)).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        engine.on_message(a, player_update("p1", Some(5.0))).await;

        assert!(rx_a.try_recv().is_err(), "sender must not receive its own update");
        match rx_b.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::Update { entity_type, id, state, is_object }) => {
                assert_eq!(entity_type, EntityKind::Player);
                assert_eq!(id, "p1");
                assert!(is_object.is_none());
                match state {
                    EntityState::Player(p) => {
                        assert_eq!(p.position.x, 9.0);
                        assert_eq!(p.speed, 5.0);
                    }
                    other => panic!("expected player state, got {:?}", other),
                }
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_player_update_partial_semantics() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        engine.on_message(a, register_msg(Some("p1"), None)).await;

        engine.on_message(a, player_update("p1", Some(5.0))).await;
        // Omitted speed keeps 5.0
        engine.on_message(a, player_update("p1", None)).await;
        drain(&mut rx_a);
        let msgs = drain(&mut rx_b);
        match msgs.last().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::Update {
                state: EntityState::Player(p), ..
            }) => assert_eq!(p.speed, 5.0),
            other => panic!("expected player update, got {:?}", other),
        }

        // Explicit zero applies
        engine.on_message(a, player_update("p1", Some(0.0))).await;
        match rx_b.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::Update {
                state: EntityState::Player(p), ..
            }) => assert_eq!(p.speed, 0.0),
            other => panic!("expected player update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_unknown_player_is_dropped() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        // Never auto-created, unlike world objects
        engine.on_message(a, player_update("ghost", Some(1.0))).await;

        assert!(rx_a.try_recv().is_err());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_world_update_auto_creates_then_updates() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        let world_update = |x: f64| {
            ClientMessage::Update(EntityUpdate {
                entity_type: EntityKind::World,
                id: "crate1".to_string(),
                state: UpdateState {
                    position: Position::new(x, 0.0, 0.0),
                    rotation: Rotation::default(),
                    speed: None,
                    is_falling: None,
                },
                is_object: true,
            })
        };

        // First sight: add_object, sender excluded
        engine.on_message(a, world_update(1.0)).await;
        assert!(rx_a.try_recv().is_err());
        match rx_b.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::AddObject { id, state, is_object }) => {
                assert_eq!(id, "crate1");
                assert!(is_object);
                assert_eq!(state.position.x, 1.0);
            }
            other => panic!("expected add_object, got {:?}", other),
        }

        // Second sight: update with isObject set
        engine.on_message(a, world_update(2.0)).await;
        match rx_b.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::Update { entity_type, is_object, state, .. }) => {
                assert_eq!(entity_type, EntityKind::World);
                assert_eq!(is_object, Some(true));
                match state {
                    EntityState::Object(obj) => assert_eq!(obj.position.x, 2.0),
                    other => panic!("expected object state, got {:?}", other),
                }
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transform_resolves_player_then_object() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        engine.on_message(a, register_msg(Some("p1"), None)).await;
        engine.on_message(a, batch_msg(&["rock1"])).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        let transform = |id: &str| {
            ClientMessage::Transform(TransformUpdate {
                id: id.to_string(),
                x: 7.0,
                y: 8.0,
                z: 9.0,
                pitch: 0.0,
                yaw: 45.0,
                roll: 0.0,
                speed: Some(3.0),
                is_falling: Some(true),
            })
        };

        // Player id resolves to the player path
        engine.on_message(a, transform("p1")).await;
        assert!(rx_a.try_recv().is_err());
        match rx_b.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::Transform { player_id, state }) => {
                assert_eq!(player_id, "p1");
                assert_eq!(state.position, Position::new(7.0, 8.0, 9.0));
                assert_eq!(state.speed, 3.0);
                assert!(state.is_falling);
            }
            other => panic!("expected transform, got {:?}", other),
        }

        // Object id resolves to the world path, as an update event
        engine.on_message(a, transform("rock1")).await;
        match rx_b.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::Update { entity_type, id, .. }) => {
                assert_eq!(entity_type, EntityKind::World);
                assert_eq!(id, "rock1");
            }
            other => panic!("expected update, got {:?}", other),
        }

        // Unknown id: logged and dropped
        engine.on_message(a, transform("nobody")).await;
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_chat_resolves_display_name() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        engine.on_message(a, register_msg(Some("p1"), Some("Alice"))).await;
        drain(&mut rx_a);

        let chat = |player_id: &str| ClientMessage::Chat {
            player_id: player_id.to_string(),
            message: "hello".to_string(),
        };

        // Chat goes to everyone, sender included, with the name resolved
        engine.on_message(a, chat("p1")).await;
        match rx_a.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::NewChat { player_id, message }) => {
                assert_eq!(player_id, "Alice");
                assert_eq!(message, "hello");
            }
            other => panic!("expected new_chat, got {:?}", other),
        }

        // Unknown sender falls back to the raw id
        engine.on_message(a, chat("stranger")).await;
        match rx_a.try_recv().unwrap() {
            ServerMessage::RenderUpdate(RenderUpdate::NewChat { player_id, .. }) => {
                assert_eq!(player_id, "stranger");
            }
            other => panic!("expected new_chat, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_state_matches_store_contents() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        engine.on_message(a, batch_msg(&["rock1", "rock2"])).await;
        engine.on_message(a, register_msg(Some("p1"), None)).await;
        drain(&mut rx_a);

        engine.on_message(a, ClientMessage::RequestState).await;

        match rx_a.try_recv().unwrap() {
            ServerMessage::StateSync { initialized, world_objects, player_characters } => {
                assert!(initialized);
                let ids: Vec<&str> = world_objects.iter().map(|o| o.object_id.as_str()).collect();
                assert_eq!(ids, vec!["rock1", "rock2"]);
                assert_eq!(player_characters.len(), 1);
                assert_eq!(player_characters[0].player_id, "p1");
            }
            other => panic!("expected state_sync, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_disconnect_removes_character_and_broadcasts_once() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        engine.on_message(a, register_msg(Some("p1"), None)).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        engine.on_disconnect(a).await;

        let msgs = drain(&mut rx_b);
        let removes: Vec<_> = msgs
            .iter()
            .filter(|m| {
                matches!(
                    m,
                    ServerMessage::RenderUpdate(RenderUpdate::RemoveCharacter { player_id })
                        if player_id == "p1"
                )
            })
            .collect();
        assert_eq!(removes.len(), 1);

        // Character is gone from the next snapshot; the id may be reused
        let (c, mut rx_c) = connect(&engine).await;
        match rx_c.try_recv().unwrap() {
            ServerMessage::StateSync { player_characters, .. } => {
                assert!(player_characters.is_empty());
            }
            other => panic!("expected state_sync, got {:?}", other),
        }
        engine.on_message(c, register_msg(Some("p1"), None)).await;
        assert_eq!(engine.connection_count().await, 2);
    }

    #[tokio::test]
    async fn test_disconnect_without_character_is_quiet() {
        let engine = Engine::new();
        let (a, _rx_a) = connect(&engine).await;
        let (_b, mut rx_b) = connect(&engine).await;
        drain(&mut rx_b);

        engine.on_disconnect(a).await;
        engine.on_disconnect(a).await; // idempotent

        assert!(rx_b.try_recv().is_err());
        assert_eq!(engine.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_message_kind_is_ignored() {
        let engine = Engine::new();
        let (a, mut rx_a) = connect(&engine).await;
        drain(&mut rx_a);

        engine.on_message(a, ClientMessage::Unknown).await;
        assert!(rx_a.try_recv().is_err());
    }
}
