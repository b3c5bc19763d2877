// Text-to-speech with an ordered engine fallback chain.
// Synthesis failure is never an error for callers: they get `UseClientFallback`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

pub mod cloud;
pub mod handlers;
pub mod local;

pub use cloud::GoogleCloudTts;
pub use local::LocalTts;

/// Longer input is cut to this many characters and `"..."` is appended.
pub const MAX_TTS_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedAudio {
    pub bytes: Bytes,
    pub format: AudioFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechOutcome {
    Audio(SynthesizedAudio),
    UseClientFallback,
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TTS API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid audio payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TTS command failed: {0}")]
    Command(String),

    #[error("TTS engine timed out after {0:?}")]
    Timeout(Duration),

    #[error("TTS engine returned no audio")]
    Empty,
}

/// One text-to-speech strategy. Engines are tried in order until one succeeds.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    fn name(&self) -> &'static str;
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError>;
}

/// Newlines become spaces, surrounding whitespace is trimmed, and long input is
/// truncated to `MAX_TTS_CHARS` characters plus `"..."`.
pub fn prepare_text(text: &str) -> String {
    let flat = text.replace(['\r', '\n'], " ");
    let flat = flat.trim();
    if flat.chars().count() > MAX_TTS_CHARS {
        let mut cut: String = flat.chars().take(MAX_TTS_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        flat.to_string()
    }
}

pub struct SpeechSynthesizer {
    engines: Vec<Arc<dyn SpeechEngine>>,
    audio_dir: PathBuf,
    client_threshold_chars: usize,
}

impl SpeechSynthesizer {
    pub fn new(
        engines: Vec<Arc<dyn SpeechEngine>>,
        audio_dir: impl Into<PathBuf>,
        client_threshold_chars: usize,
    ) -> Self {
        Self {
            engines,
            audio_dir: audio_dir.into(),
            client_threshold_chars,
        }
    }

    /// Cloud engine first when a key is configured, then the local command.
    pub fn from_config(config: &Config) -> Result<Self, SpeechError> {
        let timeout = Duration::from_secs(config.tts_timeout_secs);
        let mut engines: Vec<Arc<dyn SpeechEngine>> = Vec::new();

        if let Some(key) = &config.google_tts_api_key {
            engines.push(Arc::new(GoogleCloudTts::new(key.clone(), timeout)?));
        }
        if !config.local_tts_command.trim().is_empty() {
            engines.push(Arc::new(LocalTts::new(
                config.local_tts_command.trim().to_string(),
                timeout,
            )));
        }

        let names: Vec<&str> = engines.iter().map(|e| e.name()).collect();
        info!("TTS engines: {names:?}");

        Ok(Self::new(
            engines,
            config.audio_dir.clone(),
            config.client_tts_threshold_chars,
        ))
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Runs the engine chain. Client-side synthesis is requested up front when
    /// the caller prefers it or the text exceeds the configured threshold.
    pub async fn synthesize(&self, text: &str, prefer_client: bool) -> SpeechOutcome {
        if prefer_client || text.chars().count() > self.client_threshold_chars {
            return SpeechOutcome::UseClientFallback;
        }

        let prepared = prepare_text(text);
        if prepared.is_empty() {
            return SpeechOutcome::UseClientFallback;
        }

        for engine in &self.engines {
            match engine.synthesize(&prepared).await {
                Ok(audio) if !audio.bytes.is_empty() => {
                    info!(
                        "{} produced {} bytes of {}",
                        engine.name(),
                        audio.bytes.len(),
                        audio.format.extension()
                    );
                    return SpeechOutcome::Audio(audio);
                }
                Ok(_) => warn!("{} returned empty audio", engine.name()),
                Err(e) => warn!("{} failed: {e}", engine.name()),
            }
        }

        SpeechOutcome::UseClientFallback
    }

    /// Synthesizes into `<audio_dir>/<stem>.<ext>` and returns the file name,
    /// or `None` when no engine produced audio or the write failed.
    pub async fn synthesize_to_file(&self, text: &str, stem: &str) -> Option<String> {
        let SpeechOutcome::Audio(audio) = self.synthesize(text, false).await else {
            return None;
        };

        let file_name = format!("{stem}.{}", audio.format.extension());
        let path = self.audio_dir.join(&file_name);
        let written = async {
            tokio::fs::create_dir_all(&self.audio_dir).await?;
            tokio::fs::write(&path, &audio.bytes).await
        }
        .await;

        match written {
            Ok(()) => Some(file_name),
            Err(e) => {
                warn!("Could not write audio file {}: {e}", path.display());
                None
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FixedEngine;
    use super::*;

    fn synth(engines: Vec<Arc<dyn SpeechEngine>>, dir: &Path) -> SpeechSynthesizer {
        SpeechSynthesizer::new(engines, dir, 1500)
    }

    #[test]
    fn test_prepare_text_flattens_and_truncates() {
        assert_eq!(prepare_text("  Hello\nworld \n"), "Hello world");

        let long = "a".repeat(MAX_TTS_CHARS + 5);
        let prepared = prepare_text(&long);
        assert_eq!(prepared.chars().count(), MAX_TTS_CHARS + 3);
        assert!(prepared.ends_with("..."));
    }

    #[tokio::test]
    async fn test_falls_through_to_next_engine() {
        let dir = tempfile::tempdir().unwrap();
        let cloud = FixedEngine::failing();
        let local = FixedEngine::ok(AudioFormat::Wav);
        let engines: Vec<Arc<dyn SpeechEngine>> = vec![cloud.clone(), local.clone()];
        let s = synth(engines, dir.path());

        match s.synthesize("Hello", false).await {
            SpeechOutcome::Audio(audio) => assert_eq!(audio.format, AudioFormat::Wav),
            other => panic!("expected audio, got {other:?}"),
        }
        assert_eq!(cloud.calls(), 1);
        assert_eq!(local.calls(), 1);
    }

    #[tokio::test]
    async fn test_all_engines_failing_means_client_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let engines: Vec<Arc<dyn SpeechEngine>> =
            vec![FixedEngine::failing(), FixedEngine::failing()];
        let s = synth(engines, dir.path());
        assert_eq!(s.synthesize("Hello", false).await, SpeechOutcome::UseClientFallback);

        let none = synth(vec![], dir.path());
        assert_eq!(none.synthesize("Hello", false).await, SpeechOutcome::UseClientFallback);
    }

    #[tokio::test]
    async fn test_client_preference_and_threshold_skip_engines() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FixedEngine::ok(AudioFormat::Mp3);
        let s = synth(vec![engine.clone() as Arc<dyn SpeechEngine>], dir.path());

        assert_eq!(s.synthesize("Hi", true).await, SpeechOutcome::UseClientFallback);
        let long = "word ".repeat(400);
        assert_eq!(s.synthesize(&long, false).await, SpeechOutcome::UseClientFallback);
        assert_eq!(engine.calls(), 0);
    }

    #[tokio::test]
    async fn test_engines_receive_prepared_text() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FixedEngine::ok(AudioFormat::Mp3);
        let s = synth(vec![engine.clone() as Arc<dyn SpeechEngine>], dir.path());

        s.synthesize("line one\nline two", false).await;
        assert_eq!(
            engine.last_text.lock().unwrap().as_deref(),
            Some("line one line two")
        );
    }

    #[tokio::test]
    async fn test_synthesize_to_file_writes_with_engine_extension() {
        let dir = tempfile::tempdir().unwrap();
        let audio_dir = dir.path().join("audio");
        let s = synth(vec![FixedEngine::ok(AudioFormat::Wav) as Arc<dyn SpeechEngine>], &audio_dir);

        let name = s.synthesize_to_file("Hello", "intro_1").await.unwrap();
        assert_eq!(name, "intro_1.wav");
        assert_eq!(std::fs::read(audio_dir.join(&name)).unwrap(), b"AUDIO");

        let silent = synth(vec![], &audio_dir);
        assert_eq!(silent.synthesize_to_file("Hello", "x").await, None);
    }
}
