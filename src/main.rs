//! Memory service: per-user memory CRUD backed by SQLite plus the chat
//! `/message` endpoint.

use chat_memory::{api, config, logging, server, AppState, Result};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing first, so configuration warnings are not lost
    logging::init_tracing(config::Environment::from_env(), "chat_memory=debug,tower_http=debug");
    let config = config::init();

    tracing::info!(environment = ?config.environment, "Starting chat-memory");

    // Initialize application state (pool + schema)
    let state = AppState::new(config).await?;
    tracing::info!("Database ready");

    let addr = config.server.bind_addr(DEFAULT_PORT)?;
    server::run("chat-memory", addr, api::memory_app(state)).await
}
