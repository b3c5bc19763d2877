// Interview session persistence.
// Backends: file (durable), memory (volatile), redis (shared between processes).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::interview::models::InterviewSession;

pub mod file;
pub mod memory;
pub mod redis;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use redis::RedisSessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session id '{0}'")]
    InvalidId(String),

    #[error("I/O error: {0}")]
    Io(#[from] anyhow::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
}

/// Keyed storage for interview sessions. `load` of an id that was never saved
/// is `Ok(None)`, not an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, id: &str, session: &InterviewSession) -> Result<(), SessionError>;
    async fn load(&self, id: &str) -> Result<Option<InterviewSession>, SessionError>;
}

/// Ids double as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// One async mutex per session id. Handlers hold the guard across their whole
/// load-modify-save cycle.
#[derive(Default)]
pub struct SessionLocks {
    inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            // Entries nobody else holds are dropped on the way in.
            map.retain(|key, lock| key == id || Arc::strong_count(lock) > 1);
            map.entry(id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}
