use async_trait::async_trait;
use ::redis::{AsyncCommands, Client};

use super::{SessionError, SessionStore};
use crate::interview::models::InterviewSession;

const KEY_PREFIX: &str = "interview_session:";

/// Sessions stored as JSON strings at `interview_session:<id>`.
pub struct RedisSessionStore {
    client: Client,
}

impl RedisSessionStore {
    pub fn open(url: &str) -> Result<Self, SessionError> {
        Ok(Self {
            client: Client::open(url)?,
        })
    }
}

pub fn session_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, id: &str, session: &InterviewSession) -> Result<(), SessionError> {
        let payload = serde_json::to_string(session)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(session_key(id), payload).await?;
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<InterviewSession>, SessionError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(session_key(id)).await?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
