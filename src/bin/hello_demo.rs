//! Demo server that answers "Hello World" and stops itself after a few seconds.

use tokio::net::TcpListener;

use chat_memory::{api, config, logging, server, Result};

const DEFAULT_PORT: u16 = 3003;

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing first, so configuration warnings are not lost
    logging::init_tracing(config::Environment::from_env(), "chat_memory=debug,tower_http=info");
    let config = config::init();

    let addr = config.server.bind_addr(DEFAULT_PORT)?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        "hello-demo listening on {}, stopping in {:?}",
        listener.local_addr()?,
        config.demo.shutdown_after
    );

    server::serve(
        listener,
        api::hello::routes(),
        server::shutdown_after(config.demo.shutdown_after),
    )
    .await?;

    tracing::info!("hello-demo stopped");
    Ok(())
}
