//! Axum route handlers for question generation.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::questions::generator::get_random_problem;
use crate::questions::models::{Difficulty, Question};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub difficulty: Option<String>,
}

/// GET /get_question?difficulty=easy|medium|hard
///
/// Missing or unrecognized difficulty means easy.
pub async fn handle_get_question(
    State(state): State<AppState>,
    Query(query): Query<QuestionQuery>,
) -> Result<Json<Question>, AppError> {
    let difficulty = query
        .difficulty
        .as_deref()
        .and_then(Difficulty::parse)
        .unwrap_or_default();

    let question = get_random_problem(state.generator.as_ref(), &state.history, difficulty).await?;
    Ok(Json(question))
}
