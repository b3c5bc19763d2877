//! Model-judged code evaluation.
//!
//! Nothing here returns an error: an upstream or parse failure is folded into a
//! failed result that still has the full response shape.

use tracing::{debug, warn};

use crate::evaluation::models::{
    value_bool, value_text, value_u32, RawSubmission, RawTestCaseResult, SubmissionResult,
    TestCasePayload, TestCaseResult, TestResult,
};
use crate::evaluation::prompts::{RUN_TEST_CASE_PROMPT_TEMPLATE, SUBMISSION_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_json, LlmError, TextGenerator};

pub const DEFAULT_EXECUTION_TIME: &str = "10-50";
pub const DEFAULT_MEMORY_USAGE: &str = "5-20";

pub fn build_test_case_prompt(language: &str, code: &str, test_case: &TestCasePayload) -> String {
    fill_template(
        RUN_TEST_CASE_PROMPT_TEMPLATE,
        &[
            ("input", test_case.input_text().as_str()),
            ("expected_output", test_case.output_text().as_str()),
            ("language", language),
            ("code", code),
        ],
    )
}

pub fn build_submission_prompt(
    language: &str,
    code: &str,
    question: &str,
    examples: &[TestCasePayload],
) -> String {
    let examples_text: String = examples
        .iter()
        .enumerate()
        .map(|(i, ex)| {
            format!(
                "Example {}:\nInput: {}\nExpected Output: {}\n\n",
                i + 1,
                ex.input_text(),
                ex.output_text()
            )
        })
        .collect();

    fill_template(
        SUBMISSION_PROMPT_TEMPLATE,
        &[
            ("question", question),
            ("examples", examples_text.as_str()),
            ("language", language),
            ("code", code),
        ],
    )
}

pub async fn run_test_case(
    generator: &dyn TextGenerator,
    language: &str,
    code: &str,
    test_case: &TestCasePayload,
) -> TestCaseResult {
    let prompt = build_test_case_prompt(language, code, test_case);
    match generate_json::<RawTestCaseResult>(generator, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(raw) => normalize_test_case(raw, test_case),
        Err(e) => {
            warn!("Error evaluating test case: {e}");
            test_case_failure(test_case, &e)
        }
    }
}

pub fn normalize_test_case(raw: RawTestCaseResult, test_case: &TestCasePayload) -> TestCaseResult {
    let passed = value_bool(raw.passed).unwrap_or(false);
    let explanation = value_text(raw.explanation).unwrap_or_else(|| {
        if passed {
            "Test passed successfully".to_string()
        } else {
            "Output did not match expected result".to_string()
        }
    });

    TestCaseResult {
        passed,
        actual_output: value_text(raw.actual_output)
            .unwrap_or_else(|| "Unable to determine output".to_string()),
        expected_output: value_text(raw.expected_output)
            .unwrap_or_else(|| test_case.output_text()),
        explanation,
    }
}

fn test_case_failure(test_case: &TestCasePayload, err: &LlmError) -> TestCaseResult {
    TestCaseResult {
        passed: false,
        actual_output: "Error processing code".to_string(),
        expected_output: test_case.output_text(),
        explanation: format!("Failed to evaluate the test case: {err}"),
    }
}

pub async fn evaluate_solution(
    generator: &dyn TextGenerator,
    language: &str,
    code: &str,
    question: &str,
    examples: &[TestCasePayload],
) -> SubmissionResult {
    let prompt = build_submission_prompt(language, code, question, examples);
    match generate_json::<RawSubmission>(generator, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(raw) => {
            let result = normalize_submission(raw, examples);
            debug!(
                "Submission evaluated: {}/{} passed",
                result.passed_tests, result.total_tests
            );
            result
        }
        Err(e) => {
            warn!("Error evaluating solution: {e}");
            submission_failure(examples, &e)
        }
    }
}

pub fn normalize_submission(raw: RawSubmission, examples: &[TestCasePayload]) -> SubmissionResult {
    let test_results: Vec<TestResult> = raw
        .test_results
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let example = examples.get(i);
            TestResult {
                test_number: value_u32(r.test_number).unwrap_or(i as u32 + 1),
                passed: value_bool(r.passed).unwrap_or(false),
                input: value_text(r.input)
                    .or_else(|| example.map(TestCasePayload::input_text))
                    .unwrap_or_default(),
                expected_output: value_text(r.expected_output)
                    .or_else(|| example.map(TestCasePayload::output_text))
                    .unwrap_or_default(),
                actual_output: value_text(r.actual_output)
                    .unwrap_or_else(|| "Unable to determine".to_string()),
                explanation: value_text(r.explanation)
                    .unwrap_or_else(|| "Output did not match expected result".to_string()),
            }
        })
        .collect();

    let counted = test_results.iter().filter(|r| r.passed).count() as u32;

    SubmissionResult {
        success: value_bool(raw.success).unwrap_or(false),
        passed_tests: value_u32(raw.passed_tests).unwrap_or(counted),
        total_tests: value_u32(raw.total_tests).unwrap_or(examples.len() as u32),
        test_results,
        execution_time: value_text(raw.execution_time)
            .unwrap_or_else(|| DEFAULT_EXECUTION_TIME.to_string()),
        memory_usage: value_text(raw.memory_usage)
            .unwrap_or_else(|| DEFAULT_MEMORY_USAGE.to_string()),
        feedback: value_text(raw.feedback).unwrap_or_default(),
        error: None,
        details: None,
    }
}

fn submission_failure(examples: &[TestCasePayload], err: &LlmError) -> SubmissionResult {
    let test_results = examples
        .iter()
        .enumerate()
        .map(|(i, ex)| TestResult {
            test_number: i as u32 + 1,
            passed: false,
            input: ex.input_text(),
            expected_output: ex.output_text(),
            actual_output: "Unable to evaluate".to_string(),
            explanation: format!("Evaluation failed: {err}"),
        })
        .collect();

    SubmissionResult {
        success: false,
        passed_tests: 0,
        total_tests: examples.len() as u32,
        test_results,
        execution_time: DEFAULT_EXECUTION_TIME.to_string(),
        memory_usage: DEFAULT_MEMORY_USAGE.to_string(),
        feedback: String::new(),
        error: Some("Failed to evaluate the solution".to_string()),
        details: Some(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::testing::{failing, ScriptedGenerator};

    fn example(input: &str, output: &str) -> TestCasePayload {
        TestCasePayload {
            input: json!(input),
            output: json!(output),
        }
    }

    #[test]
    fn test_submission_prompt_lists_examples() {
        let prompt = build_submission_prompt(
            "python",
            "def solution(): pass",
            "Add two numbers.",
            &[example("1 2", "3"), example("2 2", "4")],
        );
        assert!(prompt.contains("Example 2:\nInput: 2 2\nExpected Output: 4"));
        assert!(prompt.contains("```python\ndef solution(): pass\n```"));
        assert!(prompt.contains("Add two numbers."));
    }

    #[test]
    fn test_placeholders_in_test_input_are_not_expanded() {
        let case = example("{code}", "{language}");
        let prompt = build_test_case_prompt("rust", "fn main() {}", &case);
        assert_eq!(prompt.matches("fn main() {}").count(), 1);
        assert!(prompt.contains("{code}"));
        assert!(prompt.contains("{language}"));
    }

    #[tokio::test]
    async fn test_run_test_case_fills_missing_fields() {
        let generator = ScriptedGenerator::new(|_| Ok("```json\n{\"passed\": true}\n```".into()));
        let result = run_test_case(&generator, "python", "code", &example("1", "2")).await;

        assert_eq!(
            result,
            TestCaseResult {
                passed: true,
                actual_output: "Unable to determine output".into(),
                expected_output: "2".into(),
                explanation: "Test passed successfully".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_run_test_case_degrades_on_upstream_failure() {
        let result = run_test_case(&failing(), "python", "code", &example("1", "2")).await;

        assert!(!result.passed);
        assert_eq!(result.actual_output, "Error processing code");
        assert_eq!(result.expected_output, "2");
        assert!(result.explanation.starts_with("Failed to evaluate the test case: "));
    }

    #[tokio::test]
    async fn test_run_test_case_unparseable_reply_degrades() {
        let generator = ScriptedGenerator::new(|_| Ok("The code looks right to me.".into()));
        let result = run_test_case(&generator, "java", "code", &example("1", "2")).await;
        assert!(!result.passed);
        assert_eq!(result.actual_output, "Error processing code");
    }

    #[test]
    fn test_normalize_submission_defaults() {
        let raw: RawSubmission = serde_json::from_value(json!({
            "success": "true",
            "test_results": [
                {"passed": true, "actual_output": 3},
                {"test_number": "2", "passed": false}
            ]
        }))
        .unwrap();
        let examples = [example("1 2", "3"), example("2 2", "4")];

        let result = normalize_submission(raw, &examples);

        assert!(result.success);
        assert_eq!(result.passed_tests, 1);
        assert_eq!(result.total_tests, 2);
        assert_eq!(result.execution_time, "10-50");
        assert_eq!(result.memory_usage, "5-20");
        assert_eq!(result.test_results[0].test_number, 1);
        assert_eq!(result.test_results[0].input, "1 2");
        assert_eq!(result.test_results[0].actual_output, "3");
        assert_eq!(result.test_results[1].expected_output, "4");
        assert_eq!(result.test_results[1].actual_output, "Unable to determine");
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_evaluate_solution_failure_has_placeholder_per_example() {
        let examples = [example("a", "b"), example("c", "d")];
        let result = evaluate_solution(&failing(), "cpp", "code", "Q", &examples).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Failed to evaluate the solution"));
        assert!(result.details.is_some());
        assert_eq!(result.total_tests, 2);
        assert_eq!(result.test_results.len(), 2);
        assert!(result
            .test_results
            .iter()
            .all(|r| !r.passed && r.actual_output == "Unable to evaluate"));
    }

    #[test]
    fn test_failure_serializes_error_fields_only_when_present() {
        let ok = normalize_submission(RawSubmission::default(), &[]);
        let value = serde_json::to_value(&ok).unwrap();
        assert!(value.get("error").is_none());
        assert!(value.get("details").is_none());
    }
}
