//! Axum route handlers for audio delivery and on-demand synthesis.

use std::path::Path;

use axum::{
    extract::{Path as UrlPath, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::speech::{AudioFormat, SpeechOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StreamAudioRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub prefer_browser_tts: bool,
}

fn audio_response(bytes: impl Into<axum::body::Body>, format: AudioFormat) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(format.mime_type())),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store, must-revalidate"),
            ),
            (header::PRAGMA, HeaderValue::from_static("no-cache")),
            (header::EXPIRES, HeaderValue::from_static("0")),
        ],
        bytes.into(),
    )
        .into_response()
}

/// Names to try for a requested audio file, in order: the base name itself,
/// then its `.wav` sibling when an `.mp3` was asked for.
pub fn audio_candidates(requested: &str) -> Vec<String> {
    let Some(base) = Path::new(requested).file_name().and_then(|n| n.to_str()) else {
        return Vec::new();
    };
    let mut names = vec![base.to_string()];
    if let Some(stem) = base.strip_suffix(".mp3") {
        names.push(format!("{stem}.wav"));
    }
    names
}

/// GET /get_audio/:filename
pub async fn handle_get_audio(
    State(state): State<AppState>,
    UrlPath(filename): UrlPath<String>,
) -> Result<Response, AppError> {
    for name in audio_candidates(&filename) {
        let Some(format) = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(AudioFormat::from_extension)
        else {
            continue;
        };

        let path = state.speech.audio_dir().join(&name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                info!("Serving audio file {} ({} bytes)", path.display(), bytes.len());
                return Ok(audio_response(bytes, format));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::NotFound("Audio file not found".into()))
}

/// POST /stream_audio
///
/// Audio bytes when an engine succeeds, otherwise `{use_browser_tts: true, text}`
/// so the client can speak the text itself.
pub async fn handle_stream_audio(
    State(state): State<AppState>,
    Json(req): Json<StreamAudioRequest>,
) -> Result<Response, AppError> {
    let text = req
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("No text provided".into()))?;

    match state.speech.synthesize(&text, req.prefer_browser_tts).await {
        SpeechOutcome::Audio(audio) => Ok(audio_response(audio.bytes, audio.format)),
        SpeechOutcome::UseClientFallback => Ok(Json(json!({
            "use_browser_tts": true,
            "text": text
        }))
        .into_response()),
    }
}

/// POST /speech_to_text
pub async fn handle_speech_to_text() -> impl IntoResponse {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({
            "success": false,
            "error": "Speech-to-text functionality not implemented yet",
            "text": ""
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_strip_directories() {
        assert_eq!(audio_candidates("../../etc/passwd"), vec!["passwd"]);
        assert_eq!(
            audio_candidates("intro_1.mp3"),
            vec!["intro_1.mp3", "intro_1.wav"]
        );
        assert_eq!(audio_candidates("reply.wav"), vec!["reply.wav"]);
        assert!(audio_candidates("..").is_empty());
    }

    #[test]
    fn test_audio_response_headers() {
        let resp = audio_response(b"RIFF".to_vec(), AudioFormat::Wav);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(
            resp.headers()[header::CACHE_CONTROL],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(resp.headers()[header::PRAGMA], "no-cache");
    }
}
