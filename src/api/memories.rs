//! Memories Routes
//!
//! CRUD operations for a user's memories.
//!
//! Routes:
//! - GET /memory/:user_id - List the 200 most recent memories
//! - POST /memory/:user_id - Add a memory
//! - DELETE /memory/:user_id - Delete all memories of the user
//! - DELETE /memory/:user_id/:memory_id - Delete one memory

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::db::Memory;
use crate::services::NewMemory;
use crate::{AppState, Error, Result};

/// Build memory routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:user_id",
            get(list_memories).post(create_memory).delete(clear_memories),
        )
        .route("/:user_id/:memory_id", delete(delete_memory))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to add a memory.
#[derive(Debug, Deserialize)]
pub struct CreateMemoryRequest {
    pub key: Option<String>,
    /// Required. Scalars other than strings are stored as their JSON text.
    pub value: Option<Value>,
    pub tags: Option<Vec<String>>,
    /// 1..=5, defaults to 1
    pub importance: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreateMemoryResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

// ============================================================================
// Path Extractors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UserPath {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct MemoryPath {
    pub user_id: String,
    pub memory_id: Uuid,
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_memories(
    State(state): State<AppState>,
    WithRejection(Path(path), _): WithRejection<Path<UserPath>, Error>,
) -> Result<Json<Vec<Memory>>> {
    let memories = state.memory.list_memories(&path.user_id).await?;
    Ok(Json(memories))
}

async fn create_memory(
    State(state): State<AppState>,
    WithRejection(Path(path), _): WithRejection<Path<UserPath>, Error>,
    WithRejection(Json(request), _): WithRejection<Json<CreateMemoryRequest>, Error>,
) -> Result<(StatusCode, Json<CreateMemoryResponse>)> {
    let id = state
        .memory
        .add_memory(
            &path.user_id,
            NewMemory {
                key: request.key,
                value: request.value.and_then(value_text),
                tags: request.tags,
                importance: request.importance,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreateMemoryResponse { id })))
}

/// Text form of a submitted `value`; falsy JSON (`null`, `false`, `0`) counts as missing.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null | Value::Bool(false) => None,
        Value::Number(ref n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

async fn delete_memory(
    State(state): State<AppState>,
    WithRejection(Path(path), _): WithRejection<Path<MemoryPath>, Error>,
) -> Result<Json<OkResponse>> {
    state
        .memory
        .delete_memory(&path.user_id, &path.memory_id.to_string())
        .await?;
    Ok(Json(OkResponse { ok: true }))
}

async fn clear_memories(
    State(state): State<AppState>,
    WithRejection(Path(path), _): WithRejection<Path<UserPath>, Error>,
) -> Result<Json<OkResponse>> {
    state.memory.clear_memories(&path.user_id).await?;
    Ok(Json(OkResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(json!("tea")), Some("tea".to_string()));
        assert_eq!(value_text(json!(42)), Some("42".to_string()));
        assert_eq!(value_text(json!(true)), Some("true".to_string()));
        assert_eq!(value_text(json!(0)), None);
        assert_eq!(value_text(json!(false)), None);
        assert_eq!(value_text(Value::Null), None);
    }
}
