use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_API_URL;

/// Which backend holds interview sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    /// One JSON file per session, survives restarts.
    File,
    /// Process-lifetime map, lost on restart.
    Memory,
    /// Shared Redis instance, for multi-process deployments.
    Redis,
}

impl SessionBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionBackend::File => "file",
            SessionBackend::Memory => "memory",
            SessionBackend::Redis => "redis",
        }
    }
}

impl FromStr for SessionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "durable" => Ok(SessionBackend::File),
            "memory" | "volatile" => Ok(SessionBackend::Memory),
            "redis" => Ok(SessionBackend::Redis),
            other => bail!("Unknown SESSION_BACKEND '{other}' (expected file, memory or redis)"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Only the LLM key is required; everything else has a working default.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub question_cache_dir: PathBuf,
    pub sessions_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub session_backend: SessionBackend,
    pub redis_url: Option<String>,
    pub google_tts_api_key: Option<String>,
    /// Empty string disables the local engine.
    pub local_tts_command: String,
    pub llm_timeout_secs: u64,
    pub llm_max_attempts: u32,
    pub tts_timeout_secs: u64,
    /// Texts longer than this go straight to client-side synthesis.
    pub client_tts_threshold_chars: usize,
    /// Synthesize interview replies to disk and hand out `audio_url`s.
    pub pregenerate_audio: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_backend: SessionBackend = optional_env("SESSION_BACKEND")
            .unwrap_or_else(|| "file".to_string())
            .parse()?;
        let redis_url = optional_env("REDIS_URL");
        if session_backend == SessionBackend::Redis && redis_url.is_none() {
            bail!("SESSION_BACKEND=redis requires REDIS_URL to be set");
        }

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: optional_env("ANTHROPIC_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            question_cache_dir: optional_env("QUESTION_CACHE_DIR")
                .unwrap_or_else(|| "question_cache".to_string())
                .into(),
            sessions_dir: optional_env("SESSIONS_DIR")
                .unwrap_or_else(|| "interview_sessions".to_string())
                .into(),
            audio_dir: optional_env("AUDIO_DIR")
                .unwrap_or_else(|| "audio_files".to_string())
                .into(),
            session_backend,
            redis_url,
            google_tts_api_key: optional_env("GOOGLE_TTS_API_KEY"),
            local_tts_command: std::env::var("LOCAL_TTS_COMMAND")
                .unwrap_or_else(|_| "espeak-ng".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            llm_max_attempts: parse_env("LLM_MAX_ATTEMPTS", 1)?,
            tts_timeout_secs: parse_env("TTS_TIMEOUT_SECS", 30)?,
            client_tts_threshold_chars: parse_env("CLIENT_TTS_THRESHOLD_CHARS", 1500)?,
            pregenerate_audio: parse_env("PREGENERATE_AUDIO", false)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key} has an invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config rooted in a scratch directory, with every outbound integration off.
    pub fn for_tests(root: &std::path::Path) -> Self {
        Config {
            anthropic_api_key: "test-key".to_string(),
            anthropic_api_url: DEFAULT_API_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            question_cache_dir: root.join("question_cache"),
            sessions_dir: root.join("interview_sessions"),
            audio_dir: root.join("audio_files"),
            session_backend: SessionBackend::Memory,
            redis_url: None,
            google_tts_api_key: None,
            local_tts_command: String::new(),
            llm_timeout_secs: 5,
            llm_max_attempts: 1,
            tts_timeout_secs: 5,
            client_tts_threshold_chars: 1500,
            pregenerate_audio: false,
        }
    }
}
