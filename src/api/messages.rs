//! Message Log Routes
//!
//! Routes:
//! - GET /messages - Every logged message, oldest first
//! - POST /messages - Append a message

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::services::{LoggedMessage, MessageLog};
use crate::{Error, Result};

pub fn routes(log: MessageLog) -> Router {
    Router::new()
        .route("/messages", get(list_messages).post(append_message))
        .with_state(log)
}

#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub user: Option<String>,
    pub text: Option<String>,
}

async fn list_messages(State(log): State<MessageLog>) -> Result<Json<Vec<LoggedMessage>>> {
    Ok(Json(log.list().await?))
}

async fn append_message(
    State(log): State<MessageLog>,
    WithRejection(Json(request), _): WithRejection<Json<AppendMessageRequest>, Error>,
) -> Result<(StatusCode, Json<LoggedMessage>)> {
    let message = log.append(request.user, request.text).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
