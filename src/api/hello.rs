//! Demo server: "Hello World" for every method and path.

use axum::Router;

pub const HELLO: &str = "Hello World";

pub fn routes() -> Router {
    Router::new().fallback(|| async { HELLO })
}
