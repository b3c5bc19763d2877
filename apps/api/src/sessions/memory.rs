use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{SessionError, SessionStore};
use crate::interview::models::InterviewSession;

/// Sessions held for the lifetime of the process.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, InterviewSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, id: &str, session: &InterviewSession) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .insert(id.to_string(), session.clone());
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<InterviewSession>, SessionError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }
}
