//! Memory service.
//!
//! Validates input, talks to the database layer and builds the canned replies
//! for the chat `/message` endpoint.

use serde::Serialize;
use tracing::{debug, info};

use crate::db::{self, CreateMemory, DbPool, Memory, LIST_LIMIT, MAX_IMPORTANCE, MIN_IMPORTANCE};
use crate::error::{Error, Result};

use super::remember;

/// Default importance of a memory created through the CRUD API.
pub const DEFAULT_IMPORTANCE: i64 = 1;

/// Key, tags and importance of notes captured from chat text.
pub const NOTE_KEY: &str = "note";
pub const NOTE_TAG: &str = "user-note";
pub const NOTE_IMPORTANCE: i64 = 3;

/// Fields accepted when adding a memory.
#[derive(Debug, Clone, Default)]
pub struct NewMemory {
    pub key: Option<String>,
    pub value: Option<String>,
    pub tags: Option<Vec<String>>,
    pub importance: Option<i64>,
}

/// A note captured from chat text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredNote {
    pub id: String,
    pub value: String,
}

/// Outcome of handling one chat message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageOutcome {
    pub reply: String,
    pub memories_count: i64,
    pub stored: Option<StoredNote>,
}

#[derive(Clone)]
pub struct MemoryService {
    db: DbPool,
}

impl MemoryService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Add a memory for `user_id`, creating the user on first write.
    pub async fn add_memory(&self, user_id: &str, input: NewMemory) -> Result<String> {
        let value = input
            .value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Validation("value is required".to_string()))?;

        let importance = input.importance.unwrap_or(DEFAULT_IMPORTANCE);
        if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&importance) {
            return Err(Error::Validation(format!(
                "importance must be between {} and {}",
                MIN_IMPORTANCE, MAX_IMPORTANCE
            )));
        }

        let id = db::create_memory(
            &self.db,
            CreateMemory {
                user_id: user_id.to_string(),
                key: input.key.filter(|k| !k.is_empty()),
                value,
                tags: input.tags.unwrap_or_default(),
                importance,
            },
        )
        .await?;

        debug!(user_id, memory_id = %id, "Memory added");
        Ok(id)
    }

    pub async fn list_memories(&self, user_id: &str) -> Result<Vec<Memory>> {
        db::list_memories(&self.db, user_id).await
    }

    pub async fn count_memories(&self, user_id: &str) -> Result<i64> {
        db::count_memories(&self.db, user_id).await
    }

    /// Delete one memory. Deleting a missing or foreign id is not an error.
    pub async fn delete_memory(&self, user_id: &str, id: &str) -> Result<()> {
        let deleted = db::delete_memory(&self.db, user_id, id).await?;
        debug!(user_id, memory_id = id, deleted, "Memory delete");
        Ok(())
    }

    pub async fn clear_memories(&self, user_id: &str) -> Result<()> {
        let removed = db::clear_memories(&self.db, user_id).await?;
        info!(user_id, removed, "Memories cleared");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        db::health_check(&self.db).await
    }

    /// Handle a chat message: store a note if the text asks to remember
    /// something, then reply with what happened.
    pub async fn handle_message(
        &self,
        user_id: Option<String>,
        text: Option<String>,
    ) -> Result<MessageOutcome> {
        let (Some(user_id), Some(text)) = (
            user_id.filter(|u| !u.is_empty()),
            text.filter(|t| !t.is_empty()),
        ) else {
            return Err(Error::Validation(
                "userId and text are required".to_string(),
            ));
        };

        let stored = match remember::extract_note(&text) {
            Some(value) => {
                let id = self
                    .add_memory(
                        &user_id,
                        NewMemory {
                            key: Some(NOTE_KEY.to_string()),
                            value: Some(value.clone()),
                            tags: Some(vec![NOTE_TAG.to_string()]),
                            importance: Some(NOTE_IMPORTANCE),
                        },
                    )
                    .await?;
                info!(user_id = %user_id, memory_id = %id, "Stored note from message");
                Some(StoredNote { id, value })
            }
            None => None,
        };

        // Reported as the size of the listing the user would see
        let memories_count = self.count_memories(&user_id).await?.min(LIST_LIMIT);
        let reply = match &stored {
            Some(note) => stored_reply(&note.value),
            None => idle_reply(memories_count),
        };

        Ok(MessageOutcome {
            reply,
            memories_count,
            stored,
        })
    }
}

fn stored_reply(value: &str) -> String {
    format!("باشه! اینو یاد گرفتم: «{}» ✅", value)
}

fn idle_reply(count: i64) -> String {
    format!(
        "گرفتم! ({} مورد در حافظه‌ات دارم). برای ذخیره بگو: «یاد بگیر که ...»",
        count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> MemoryService {
        let pool = db::create_pool_with_config(":memory:", db::PoolConfig::test())
            .await
            .unwrap();
        db::initialize_schema(&pool).await.unwrap();
        MemoryService::new(pool)
    }

    fn note(value: &str) -> NewMemory {
        NewMemory {
            value: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_memory_applies_defaults() {
        let svc = service().await;
        let id = svc.add_memory("alice", note("likes tea")).await.unwrap();

        let memories = svc.list_memories("alice").await.unwrap();
        assert_eq!(memories.len(), 1);
        assert_eq!(memories[0].id, id);
        assert_eq!(memories[0].key, None);
        assert!(memories[0].tags.is_empty());
        assert_eq!(memories[0].importance, DEFAULT_IMPORTANCE);
    }

    #[tokio::test]
    async fn test_add_memory_requires_value() {
        let svc = service().await;

        let err = svc.add_memory("alice", NewMemory::default()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "value is required"));

        let err = svc.add_memory("alice", note("")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert_eq!(svc.count_memories("alice").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_memory_rejects_out_of_range_importance() {
        let svc = service().await;
        for importance in [0, 6, -1] {
            let input = NewMemory {
                importance: Some(importance),
                ..note("x")
            };
            assert!(matches!(
                svc.add_memory("alice", input).await,
                Err(Error::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_handle_message_stores_note() {
        let svc = service().await;
        let outcome = svc
            .handle_message(
                Some("bob".to_string()),
                Some("remember that my bike is blue".to_string()),
            )
            .await
            .unwrap();

        let stored = outcome.stored.expect("note should be stored");
        assert_eq!(stored.value, "my bike is blue");
        assert_eq!(outcome.memories_count, 1);
        assert_eq!(outcome.reply, "باشه! اینو یاد گرفتم: «my bike is blue» ✅");

        let memories = svc.list_memories("bob").await.unwrap();
        assert_eq!(memories[0].id, stored.id);
        assert_eq!(memories[0].key.as_deref(), Some(NOTE_KEY));
        assert_eq!(memories[0].tags, vec![NOTE_TAG.to_string()]);
        assert_eq!(memories[0].importance, NOTE_IMPORTANCE);
    }

    #[tokio::test]
    async fn test_handle_message_without_pattern_reports_count() {
        let svc = service().await;
        svc.add_memory("bob", note("one")).await.unwrap();
        svc.add_memory("bob", note("two")).await.unwrap();

        let outcome = svc
            .handle_message(Some("bob".to_string()), Some("hi".to_string()))
            .await
            .unwrap();

        assert!(outcome.stored.is_none());
        assert_eq!(outcome.memories_count, 2);
        assert!(outcome.reply.contains("(2 مورد"));
    }

    #[tokio::test]
    async fn test_handle_message_count_is_capped_at_listing_size() {
        let svc = service().await;
        for i in 0..(LIST_LIMIT + 5) {
            svc.add_memory("bob", note(&format!("memory {}", i)))
                .await
                .unwrap();
        }
        assert_eq!(svc.count_memories("bob").await.unwrap(), LIST_LIMIT + 5);

        let outcome = svc
            .handle_message(Some("bob".to_string()), Some("hi".to_string()))
            .await
            .unwrap();

        assert_eq!(outcome.memories_count, LIST_LIMIT);
        assert!(outcome.reply.contains("(200 مورد"));
    }

    #[tokio::test]
    async fn test_handle_message_requires_fields() {
        let svc = service().await;
        for (user, text) in [
            (None, Some("hi".to_string())),
            (Some("bob".to_string()), None),
            (Some(String::new()), Some("hi".to_string())),
            (Some("bob".to_string()), Some(String::new())),
        ] {
            let err = svc.handle_message(user, text).await.unwrap_err();
            assert_eq!(err.to_string(), "userId and text are required");
        }
    }
}
