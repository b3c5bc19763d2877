//! Axum route handlers for the spoken interview.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::interview::conductor::{final_assessment, next_question, opening_message};
use crate::interview::models::{new_session_id, truncate_resume, InterviewSession, Role};
use crate::interview::resume::resume_text_or_message;
use crate::speech::prepare_text;
use crate::state::AppState;

const DEFAULT_CANDIDATE_NAME: &str = "Candidate";

#[derive(Debug, Serialize)]
pub struct StartInterviewResponse {
    pub success: bool,
    pub session_id: String,
    pub message: String,
    pub text_for_audio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InterviewReplyRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterviewReplyResponse {
    pub success: bool,
    pub message: String,
    pub text_for_audio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EndInterviewRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EndInterviewResponse {
    pub success: bool,
    pub assessment: Value,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Pre-renders `text` into the audio directory when enabled and returns its URL.
async fn pregenerate_audio(state: &AppState, text: &str, prefix: &str) -> Option<String> {
    if !state.config.pregenerate_audio {
        return None;
    }
    let stem = format!("{prefix}_{}", uuid::Uuid::new_v4());
    state
        .speech
        .synthesize_to_file(text, &stem)
        .await
        .map(|name| format!("/get_audio/{name}"))
}

/// POST /start_interview (multipart: `name`, optional `resume` file)
pub async fn handle_start_interview(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<StartInterviewResponse>, AppError> {
    let mut name: Option<String> = None;
    let mut resume_text = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid name field: {e}")))?;
                name = non_empty(Some(value.trim().to_string()));
            }
            Some("resume") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
                if !bytes.is_empty() {
                    resume_text = resume_text_or_message(&filename, &bytes).await;
                }
            }
            _ => {}
        }
    }

    let name = name.unwrap_or_else(|| DEFAULT_CANDIDATE_NAME.to_string());
    let resume_text = truncate_resume(resume_text);
    let session_id = new_session_id();

    let greeting = opening_message(state.generator.as_ref(), &name, &resume_text).await;
    let session = InterviewSession::start(session_id.clone(), name, resume_text, greeting.clone());

    {
        let _guard = state.locks.acquire(&session_id).await;
        state.sessions.save(&session_id, &session).await?;
    }
    info!("Started interview {session_id} for {}", session.candidate_name);

    let audio_url = pregenerate_audio(&state, &greeting, "intro").await;
    Ok(Json(StartInterviewResponse {
        success: true,
        session_id,
        text_for_audio: prepare_text(&greeting),
        message: greeting,
        audio_url,
    }))
}

/// POST /interview_response
pub async fn handle_interview_response(
    State(state): State<AppState>,
    Json(req): Json<InterviewReplyRequest>,
) -> Result<Json<InterviewReplyResponse>, AppError> {
    let (Some(session_id), Some(message)) = (non_empty(req.session_id), non_empty(req.message))
    else {
        return Err(AppError::Validation("Missing session_id or message".into()));
    };

    let reply = {
        let _guard = state.locks.acquire(&session_id).await;
        let mut session = state
            .sessions
            .load(&session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".into()))?;

        session.push(Role::User, message);
        let reply = next_question(state.generator.as_ref(), &session).await;
        session.push(Role::Assistant, reply.clone());
        state.sessions.save(&session_id, &session).await?;
        reply
    };

    let audio_url = pregenerate_audio(&state, &reply, "response").await;
    Ok(Json(InterviewReplyResponse {
        success: true,
        text_for_audio: prepare_text(&reply),
        message: reply,
        audio_url,
    }))
}

/// POST /end_interview
pub async fn handle_end_interview(
    State(state): State<AppState>,
    Json(req): Json<EndInterviewRequest>,
) -> Result<Json<EndInterviewResponse>, AppError> {
    let session_id =
        non_empty(req.session_id).ok_or_else(|| AppError::Validation("Missing session_id".into()))?;

    let _guard = state.locks.acquire(&session_id).await;
    let mut session = state
        .sessions
        .load(&session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".into()))?;

    let assessment = final_assessment(state.generator.as_ref(), &session).await;
    session.complete(assessment.clone());
    state.sessions.save(&session_id, &session).await?;
    info!("Completed interview {session_id}");

    Ok(Json(EndInterviewResponse {
        success: true,
        assessment,
    }))
}
