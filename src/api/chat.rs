//! Chat Routes
//!
//! - POST /message - Reply to a chat message, storing a note when the text
//!   asks to remember something

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::services::MessageOutcome;
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new().route("/message", post(handle_message))
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub text: Option<String>,
}

async fn handle_message(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<MessageRequest>, Error>,
) -> Result<Json<MessageOutcome>> {
    let outcome = state
        .memory
        .handle_message(request.user_id, request.text)
        .await?;
    Ok(Json(outcome))
}
