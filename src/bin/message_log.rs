//! File-backed message logger.

use chat_memory::services::MessageLog;
use chat_memory::{api, config, logging, server, Result};

const DEFAULT_PORT: u16 = 3002;

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing first, so configuration warnings are not lost
    logging::init_tracing(config::Environment::from_env(), "chat_memory=debug,tower_http=debug");
    let config = config::init();

    let log = MessageLog::new(config.message_log.path.clone());
    tracing::info!("Logging messages to {}", log.path().display());

    let addr = config.server.bind_addr(DEFAULT_PORT)?;
    server::run("message-log", addr, api::messages::routes(log)).await
}
