//! Application state for the memory service.
//!
//! Contains the shared state that is passed to all handlers.

use crate::config::Config;
use crate::db::{self, DbPool, PoolConfig};
use crate::services::MemoryService;
use crate::Result;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DbPool,
    /// Memory CRUD and chat-message handling.
    pub memory: MemoryService,
}

impl AppState {
    /// Connect to the configured database and apply the schema.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::create_pool_with_config(
            &config.database.url,
            PoolConfig::from_config(&config.database),
        )
        .await?;

        db::initialize_schema(&db).await?;

        Ok(Self::from_pool(db))
    }

    /// Build the state around an existing, already migrated pool.
    pub fn from_pool(db: DbPool) -> Self {
        let memory = MemoryService::new(db.clone());
        Self { db, memory }
    }
}
