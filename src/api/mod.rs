//! API Routes
//!
//! One router per service. The memory service needs `AppState`; the other
//! services carry their own (or no) state.

mod chat;
pub mod hello;
mod memories;
pub mod messages;
pub mod ping;
pub mod status;

use axum::Router;

use crate::AppState;

/// Build the memory service router.
///
/// Route structure:
/// - /, /healthz - Banner and health check
/// - /memory/* - Memory CRUD per user
/// - /message - Chat endpoint with note capture
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .nest("/memory", memories::routes())
        .merge(chat::routes())
}

/// Memory service router with its state applied.
pub fn memory_app(state: AppState) -> Router {
    routes().with_state(state)
}
