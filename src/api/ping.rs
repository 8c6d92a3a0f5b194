//! Ping service routes.
//!
//! - GET / - Hello banner
//! - GET /ping - Liveness reply

use axum::{routing::get, Router};

pub const HELLO: &str = "Hello World!";
pub const PONG: &str = "pong 🏓";

pub fn routes() -> Router {
    Router::new()
        .route("/", get(|| async { HELLO }))
        .route("/ping", get(|| async { PONG }))
}
