use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::questions::history::HistoryStore;
use crate::sessions::{SessionLocks, SessionStore};
use crate::speech::SpeechSynthesizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `LlmClient` in production; scripted generators in tests.
    pub generator: Arc<dyn TextGenerator>,
    pub sessions: Arc<dyn SessionStore>,
    /// Serializes load-modify-save cycles per session id.
    pub locks: Arc<SessionLocks>,
    pub speech: Arc<SpeechSynthesizer>,
    /// Served-question and category history for dedup and diversity.
    pub history: Arc<HistoryStore>,
    pub config: Config,
}
