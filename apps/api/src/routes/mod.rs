pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers as evaluation;
use crate::interview::handlers as interview;
use crate::questions::handlers as questions;
use crate::speech::handlers as speech;
use crate::state::AppState;

/// Resume uploads go through multipart; allow more than axum's 2 MB default.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        // Practice questions
        .route("/get_question", get(questions::handle_get_question))
        // Code evaluation
        .route("/run_test_case", post(evaluation::handle_run_test_case))
        .route("/submit_solution", post(evaluation::handle_submit_solution))
        // Interview
        .route("/start_interview", post(interview::handle_start_interview))
        .route("/interview_response", post(interview::handle_interview_response))
        .route("/end_interview", post(interview::handle_end_interview))
        // Audio
        .route("/get_audio/:filename", get(speech::handle_get_audio))
        .route("/stream_audio", post(speech::handle_stream_audio))
        .route("/speech_to_text", post(speech::handle_speech_to_text))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
