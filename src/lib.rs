//! chat-memory
//!
//! A per-user memory API with a chat endpoint that captures "remember that
//! ..." notes, plus three small companion services (ping, file-backed message
//! log, self-terminating demo). Each service has its own binary; they share
//! configuration, error handling, logging and the server runner.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod server;
pub mod services;
pub mod state;

pub use config::config;
pub use error::{Error, Result};
pub use state::AppState;
