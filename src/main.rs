//! World Relay Server
//!
//! Binary entry point: sets up logging, builds the server config, and runs
//! the accept loop until the process is stopped.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use world_relay::{RelayServer, ServerConfig, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = ServerConfig::default();
    if let Some(addr) = std::env::args().nth(1) {
        config.bind_addr = addr
            .parse()
            .with_context(|| format!("invalid bind address: {}", addr))?;
    }

    info!("World Relay Server v{}", VERSION);

    let server = RelayServer::new(config);
    server.run().await.context("relay server failed")?;

    Ok(())
}
