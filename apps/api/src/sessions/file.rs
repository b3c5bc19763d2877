use std::path::PathBuf;

use async_trait::async_trait;

use super::{is_valid_id, SessionError, SessionStore};
use crate::interview::models::InterviewSession;
use crate::storage::{read_json_opt, write_json_atomic};

/// One `<id>.json` per session under `dir`.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, id: &str, session: &InterviewSession) -> Result<(), SessionError> {
        if !is_valid_id(id) {
            return Err(SessionError::InvalidId(id.to_string()));
        }
        write_json_atomic(&self.path_for(id), session).await?;
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<InterviewSession>, SessionError> {
        if !is_valid_id(id) {
            return Ok(None);
        }
        Ok(read_json_opt(&self.path_for(id)).await?)
    }
}
