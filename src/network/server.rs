//! WebSocket Relay Server
//!
//! Async WebSocket front door. Accepts connections, runs one reader loop
//! and one writer task per connection, and hands every decoded message to
//! the reconciliation engine. All world semantics live in the engine; this
//! file only moves frames.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, broadcast};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use futures_util::{SinkExt, StreamExt};
use tracing::{info, warn, error, debug};

use crate::network::engine::Engine;
use crate::network::protocol::{ClientMessage, ServerMessage};
use crate::network::registry::{ConnectionId, OUTBOUND_QUEUE_DEPTH};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Maximum concurrent connections.
    pub max_connections: usize,
    /// Server version string.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
            max_connections: 1000,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Relay server errors.
#[derive(Debug, thiserror::Error)]
pub enum RelayServerError {
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    BindFailed(#[from] std::io::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// The relay server.
pub struct RelayServer {
    /// Server configuration.
    config: ServerConfig,
    /// Reconciliation engine holding the shared session.
    engine: Arc<Engine>,
    /// Shutdown signal.
    shutdown_tx: broadcast::Sender<()>,
}

impl RelayServer {
    /// Create a new relay server over an empty world session.
    pub fn new(config: ServerConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            engine: Arc::new(Engine::new()),
            shutdown_tx,
        }
    }

    /// Run the accept loop until shutdown.
    pub async fn run(&self) -> Result<(), RelayServerError> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!("relay server listening on {}", self.config.bind_addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            if self.engine.connection_count().await >= self.config.max_connections {
                                warn!("connection limit reached, rejecting {}", addr);
                                continue;
                            }

                            info!("new connection from {}", addr);
                            self.handle_connection(stream, addr);
                        }
                        Err(e) => {
                            error!("accept error: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle a new WebSocket connection.
    fn handle_connection(&self, stream: TcpStream, addr: SocketAddr) {
        let engine = self.engine.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            let ws_stream = match accept_async(stream).await {
                Ok(ws) => ws,
                Err(e) => {
                    error!("WebSocket handshake failed for {}: {}", addr, e);
                    return;
                }
            };

            let (mut ws_sender, mut ws_receiver) = ws_stream.split();
            let (msg_tx, mut msg_rx) = mpsc::channel::<ServerMessage>(OUTBOUND_QUEUE_DEPTH);

            let conn_id = ConnectionId::new();

            // Registers the handle and queues the initial snapshot
            engine.on_connect(conn_id, msg_tx).await;

            // Writer task: drains this connection's queue. A failed socket
            // write ends the task; the reader loop notices via Close/error.
            let sender_task = tokio::spawn(async move {
                while let Some(msg) = msg_rx.recv().await {
                    let text = match msg.to_json() {
                        Ok(t) => t,
                        Err(e) => {
                            error!("failed to serialize message: {}", e);
                            continue;
                        }
                    };
                    if ws_sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
            });

            // Reader loop: undecodable payloads are logged and dropped, the
            // connection stays open and never gets an error reply.
            loop {
                tokio::select! {
                    msg = ws_receiver.next() => {
                        match msg {
                            Some(Ok(Message::Text(text))) => {
                                match ClientMessage::from_json(&text) {
                                    Ok(m) => engine.on_message(conn_id, m).await,
                                    Err(e) => warn!("undecodable message from {}: {}", addr, e),
                                }
                            }
                            Some(Ok(Message::Binary(data))) => {
                                match ClientMessage::from_slice(&data) {
                                    Ok(m) => engine.on_message(conn_id, m).await,
                                    Err(e) => warn!("undecodable binary frame from {}: {}", addr, e),
                                }
                            }
                            Some(Ok(Message::Close(_))) | None => {
                                debug!("client {} disconnected", addr);
                                break;
                            }
                            Some(Err(e)) => {
                                warn!("WebSocket error for {}: {}", addr, e);
                                break;
                            }
                            _ => {}
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }

            sender_task.abort();
            engine.on_disconnect(conn_id).await;
            info!("connection {} from {} cleaned up", conn_id, addr);
        });
    }

    /// Shutdown the server.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Get active connection count.
    pub async fn connection_count(&self) -> usize {
        self.engine.connection_count().await
    }
}
