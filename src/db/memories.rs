//! Memory database queries.
//!
//! A memory is a short user note with an optional key, free-form tags and an
//! importance rank. Listings are capped and ordered by recency.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::Result;

use super::{ensure_user, DbPool};

/// Maximum number of memories returned by a listing.
pub const LIST_LIMIT: i64 = 200;

/// Lowest and highest importance rank.
pub const MIN_IMPORTANCE: i64 = 1;
pub const MAX_IMPORTANCE: i64 = 5;

// ============================================================================
// Types
// ============================================================================

/// Memory row as stored. `tags` holds a JSON array.
#[derive(Debug, Clone, FromRow)]
struct MemoryRow {
    id: String,
    key: Option<String>,
    value: String,
    tags: String,
    importance: i64,
    updated_at: String,
}

/// Memory record returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub key: Option<String>,
    pub value: String,
    pub tags: Vec<String>,
    pub importance: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<MemoryRow> for Memory {
    fn from(row: MemoryRow) -> Self {
        let tags = serde_json::from_str(&row.tags).unwrap_or_default();
        let updated_at = DateTime::parse_from_rfc3339(&row.updated_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_default();

        Self {
            id: row.id,
            key: row.key,
            value: row.value,
            tags,
            importance: row.importance,
            updated_at,
        }
    }
}

/// Input for creating a new memory.
#[derive(Debug, Clone)]
pub struct CreateMemory {
    pub user_id: String,
    pub key: Option<String>,
    pub value: String,
    pub tags: Vec<String>,
    pub importance: i64,
}

// ============================================================================
// Queries
// ============================================================================

/// Create a memory, creating its owner first if needed. Returns the new id.
pub async fn create_memory(pool: &DbPool, input: CreateMemory) -> Result<String> {
    ensure_user(pool, &input.user_id).await?;

    let id = Uuid::new_v4().to_string();
    let tags_json = serde_json::to_string(&input.tags)?;
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

    sqlx::query(
        r#"
        INSERT INTO memories (id, user_id, "key", "value", tags, importance, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&input.user_id)
    .bind(&input.key)
    .bind(&input.value)
    .bind(&tags_json)
    .bind(input.importance)
    .bind(&now)
    .execute(pool)
    .await?;

    Ok(id)
}

/// List a user's memories, most recently updated first, at most `LIST_LIMIT`.
pub async fn list_memories(pool: &DbPool, user_id: &str) -> Result<Vec<Memory>> {
    let rows = sqlx::query_as::<_, MemoryRow>(
        r#"
        SELECT id, "key", "value", tags, importance, updated_at
        FROM memories
        WHERE user_id = ?
        ORDER BY updated_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Memory::from).collect())
}

/// Count all memories owned by a user.
pub async fn count_memories(pool: &DbPool, user_id: &str) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM memories WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Delete one memory if it belongs to the user. Returns whether a row matched.
pub async fn delete_memory(pool: &DbPool, user_id: &str, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM memories WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete every memory of a user. Returns the number of rows removed.
pub async fn clear_memories(pool: &DbPool, user_id: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM memories WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
