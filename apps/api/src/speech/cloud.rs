use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AudioFormat, SpeechEngine, SpeechError, SynthesizedAudio};

const GOOGLE_TTS_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";
const VOICE_NAME: &str = "en-US-Neural2-D";
const LANGUAGE_CODE: &str = "en-US";
const SPEAKING_RATE: f32 = 0.9;

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    language_code: &'a str,
    name: &'a str,
    #[serde(rename = "ssmlGender")]
    ssml_gender: &'a str,
}

#[derive(Debug, Serialize)]
struct AudioConfig {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'static str,
    #[serde(rename = "speakingRate")]
    speaking_rate: f32,
    pitch: f32,
}

#[derive(Debug, Deserialize)]
struct SynthesizeResponse {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

/// Google Cloud Text-to-Speech over REST, authenticated by API key. Returns MP3.
pub struct GoogleCloudTts {
    client: Client,
    api_key: String,
}

impl GoogleCloudTts {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, SpeechError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }
}

fn request_body(text: &str) -> SynthesizeRequest<'_> {
    SynthesizeRequest {
        input: SynthesisInput { text },
        voice: VoiceSelection {
            language_code: LANGUAGE_CODE,
            name: VOICE_NAME,
            ssml_gender: "MALE",
        },
        audio_config: AudioConfig {
            audio_encoding: "MP3",
            speaking_rate: SPEAKING_RATE,
            pitch: 0.0,
        },
    }
}

fn decode_audio(body: SynthesizeResponse) -> Result<SynthesizedAudio, SpeechError> {
    let bytes = STANDARD.decode(body.audio_content.as_bytes())?;
    if bytes.is_empty() {
        return Err(SpeechError::Empty);
    }
    Ok(SynthesizedAudio {
        bytes: Bytes::from(bytes),
        format: AudioFormat::Mp3,
    })
}

#[async_trait]
impl SpeechEngine for GoogleCloudTts {
    fn name(&self) -> &'static str {
        "google-cloud-tts"
    }

    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError> {
        let response = self
            .client
            .post(GOOGLE_TTS_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpeechError::Api {
                status: status.as_u16(),
                message,
            });
        }

        decode_audio(response.json().await?)
    }
}
