//! Hello-world ping server.

use chat_memory::{api, config, logging, server, Result};

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing first, so configuration warnings are not lost
    logging::init_tracing(config::Environment::from_env(), "chat_memory=debug,tower_http=debug");
    let config = config::init();

    let addr = config.server.bind_addr(DEFAULT_PORT)?;
    server::run("ping-server", addr, api::ping::routes()).await
}
