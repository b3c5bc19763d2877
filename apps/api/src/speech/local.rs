use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;

use super::{AudioFormat, SpeechEngine, SpeechError, SynthesizedAudio};

const SPEAKING_RATE_WPM: &str = "150";

/// A local TTS command in the espeak family, run with `-s <rate> --stdout -- <text>`.
/// Returns WAV. The `--` keeps text starting with `-` from being read as options.
pub struct LocalTts {
    command: String,
    timeout: Duration,
}

impl LocalTts {
    pub fn new(command: String, timeout: Duration) -> Self {
        Self { command, timeout }
    }
}

#[async_trait]
impl SpeechEngine for LocalTts {
    fn name(&self) -> &'static str {
        "local-tts"
    }

    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError> {
        let run = Command::new(&self.command)
            .args(["-s", SPEAKING_RATE_WPM, "--stdout", "--", text])
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| SpeechError::Timeout(self.timeout))??;

        if !output.status.success() {
            return Err(SpeechError::Command(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(SpeechError::Empty);
        }

        Ok(SynthesizedAudio {
            bytes: Bytes::from(output.stdout),
            format: AudioFormat::Wav,
        })
    }
}
