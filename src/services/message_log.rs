//! File-backed message log.
//!
//! All messages live in one JSON array file. Each append reads the whole
//! file, pushes the new record and writes it back through a temp file and a
//! rename. Appends within this process are serialized; separate processes
//! sharing the file still race (last writer wins).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};

/// One logged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedMessage {
    pub user: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct MessageLog {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl MessageLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All messages in append order. A missing or empty file is an empty log.
    pub async fn list(&self) -> Result<Vec<LoggedMessage>> {
        read_messages(&self.path).await
    }

    /// Validate and append a message, returning the stored record.
    pub async fn append(&self, user: Option<String>, text: Option<String>) -> Result<LoggedMessage> {
        let (Some(user), Some(text)) = (
            user.filter(|u| !u.is_empty()),
            text.filter(|t| !t.is_empty()),
        ) else {
            return Err(Error::Validation("user and text are required".to_string()));
        };

        let message = LoggedMessage {
            user,
            text,
            timestamp: Utc::now(),
        };

        let _guard = self.write_lock.lock().await;

        let mut messages = read_messages(&self.path).await?;
        messages.push(message.clone());
        write_messages(&self.path, &messages).await?;

        debug!(path = %self.path.display(), total = messages.len(), "Message appended");
        Ok(message)
    }
}

async fn read_messages(path: &Path) -> Result<Vec<LoggedMessage>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_slice(&bytes)?)
}

async fn write_messages(path: &Path, messages: &[LoggedMessage]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_vec_pretty(messages)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
