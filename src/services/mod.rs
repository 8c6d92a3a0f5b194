//! Business logic behind the HTTP handlers.

pub mod memory;
pub mod message_log;
pub mod remember;

pub use memory::{MemoryService, MessageOutcome, NewMemory, StoredNote};
pub use message_log::{LoggedMessage, MessageLog};
