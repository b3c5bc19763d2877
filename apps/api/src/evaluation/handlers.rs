//! Axum route handlers for code evaluation.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::evaluation::evaluator::{evaluate_solution, run_test_case};
use crate::evaluation::models::{
    RunTestCaseRequest, SubmissionResult, SubmitSolutionRequest, TestCaseResult,
};
use crate::state::AppState;

const MISSING_FIELDS: &str = "Missing required fields";

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /run_test_case
pub async fn handle_run_test_case(
    State(state): State<AppState>,
    Json(req): Json<RunTestCaseRequest>,
) -> Result<Json<TestCaseResult>, AppError> {
    let (Some(language), Some(code), Some(test_case)) =
        (non_empty(req.language), non_empty(req.code), req.test_case)
    else {
        return Err(AppError::Validation(MISSING_FIELDS.into()));
    };

    let result = run_test_case(state.generator.as_ref(), &language, &code, &test_case).await;
    Ok(Json(result))
}

/// POST /submit_solution
pub async fn handle_submit_solution(
    State(state): State<AppState>,
    Json(req): Json<SubmitSolutionRequest>,
) -> Result<Json<SubmissionResult>, AppError> {
    let (Some(language), Some(code), Some(question)) = (
        non_empty(req.language),
        non_empty(req.code),
        non_empty(req.question_description),
    ) else {
        return Err(AppError::Validation(MISSING_FIELDS.into()));
    };
    if req.examples.is_empty() {
        return Err(AppError::Validation(MISSING_FIELDS.into()));
    }

    let result = evaluate_solution(
        state.generator.as_ref(),
        &language,
        &code,
        &question,
        &req.examples,
    )
    .await;
    Ok(Json(result))
}
