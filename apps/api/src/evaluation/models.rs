//! Request/response shapes for code evaluation, plus the lenient raw shapes the
//! model answers with. Raw fields are `Option<Value>` so that a string where a
//! bool was expected degrades one field, not the whole answer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single example as sent by the client. Inputs are usually strings but
/// arrays and numbers are accepted and rendered as JSON text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestCasePayload {
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub output: Value,
}

impl TestCasePayload {
    pub fn input_text(&self) -> String {
        value_text(Some(self.input.clone())).unwrap_or_default()
    }

    pub fn output_text(&self) -> String {
        value_text(Some(self.output.clone())).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct RunTestCaseRequest {
    pub language: Option<String>,
    pub code: Option<String>,
    pub test_case: Option<TestCasePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCaseResult {
    pub passed: bool,
    pub actual_output: String,
    pub expected_output: String,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSolutionRequest {
    pub language: Option<String>,
    pub code: Option<String>,
    pub question_description: Option<String>,
    #[serde(default)]
    pub examples: Vec<TestCasePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub test_number: u32,
    pub passed: bool,
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub passed_tests: u32,
    pub total_tests: u32,
    pub test_results: Vec<TestResult>,
    pub execution_time: String,
    pub memory_usage: String,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTestCaseResult {
    pub passed: Option<Value>,
    pub actual_output: Option<Value>,
    pub expected_output: Option<Value>,
    pub explanation: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTestResult {
    pub test_number: Option<Value>,
    pub passed: Option<Value>,
    pub input: Option<Value>,
    pub expected_output: Option<Value>,
    pub actual_output: Option<Value>,
    pub explanation: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSubmission {
    pub success: Option<Value>,
    pub passed_tests: Option<Value>,
    pub total_tests: Option<Value>,
    #[serde(default)]
    pub test_results: Vec<RawTestResult>,
    pub execution_time: Option<Value>,
    pub memory_usage: Option<Value>,
    pub feedback: Option<Value>,
}

/// Text rendering of a loosely-typed field. `null` and missing are `None`.
pub fn value_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// `true`, `"true"`, `"yes"`, `"passed"` and non-zero numbers count as true.
pub fn value_bool(value: Option<Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "passed" | "pass" => Some(true),
            "false" | "no" | "failed" | "fail" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

pub fn value_u32(value: Option<Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(Some(json!("abc"))), Some("abc".to_string()));
        assert_eq!(value_text(Some(json!([1, 2]))), Some("[1,2]".to_string()));
        assert_eq!(value_text(Some(json!(null))), None);
        assert_eq!(value_text(None), None);
    }

    #[test]
    fn test_value_bool() {
        assert_eq!(value_bool(Some(json!(true))), Some(true));
        assert_eq!(value_bool(Some(json!("False"))), Some(false));
        assert_eq!(value_bool(Some(json!(1))), Some(true));
        assert_eq!(value_bool(Some(json!("maybe"))), None);
    }

    #[test]
    fn test_value_u32() {
        assert_eq!(value_u32(Some(json!(3))), Some(3));
        assert_eq!(value_u32(Some(json!(" 4 "))), Some(4));
        assert_eq!(value_u32(Some(json!(-1))), None);
    }

    #[test]
    fn test_payload_renders_structured_input() {
        let payload: TestCasePayload =
            serde_json::from_value(json!({"input": [3, 1], "output": "4"})).unwrap();
        assert_eq!(payload.input_text(), "[3,1]");
        assert_eq!(payload.output_text(), "4");
    }
}
