//! Common test utilities and helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use chat_memory::db::{self, DbPool, PoolConfig};
use chat_memory::{api, server, AppState};

/// Set up a fresh in-memory database with the schema applied.
pub async fn setup_test_db() -> DbPool {
    let pool = db::create_pool_with_config(":memory:", PoolConfig::test())
        .await
        .expect("Failed to init pool");
    db::initialize_schema(&pool)
        .await
        .expect("Failed to initialize schema");
    pool
}

/// Memory service behind the full middleware stack.
pub async fn memory_server() -> (TestServer, AppState) {
    let state = AppState::from_pool(setup_test_db().await);
    let app = server::with_middleware(api::memory_app(state.clone()));
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, state)
}
