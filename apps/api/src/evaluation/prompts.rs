// All LLM prompt templates for the Evaluation module.

/// Single test case evaluation.
/// Replace: {language}, {input}, {expected_output}, {code}
pub const RUN_TEST_CASE_PROMPT_TEMPLATE: &str = r#"Evaluate if this {language} code correctly solves this specific test case:

Test Case:
Input: {input}
Expected Output: {expected_output}

Code:
```{language}
{code}
```

Run the code with the test case input and check if the output matches the expected output.
Return your response in this JSON format ONLY, with no additional commentary:
{
  "passed": true/false,
  "actual_output": "the code's output",
  "expected_output": "{expected_output}",
  "explanation": "brief explanation of why the test passed/failed"
}"#;

/// Full submission evaluation.
/// Replace: {language}, {question}, {examples}, {code}
pub const SUBMISSION_PROMPT_TEMPLATE: &str = r#"Evaluate if this {language} code correctly solves the given problem:

Problem:
{question}

Test Cases:
{examples}

Code:
```{language}
{code}
```

Analyze step-by-step if the code handles all test cases correctly.
Return your response in this JSON format ONLY, with no additional commentary:
{
  "success": true/false,
  "passed_tests": number of tests passed,
  "total_tests": total number of tests,
  "test_results": [
    {
      "test_number": 1,
      "passed": true/false,
      "input": "test input",
      "expected_output": "expected output",
      "actual_output": "the code's output",
      "explanation": "explanation of why the test passed/failed"
    }
  ],
  "execution_time": "estimated execution time in ms",
  "memory_usage": "estimated memory usage in MB",
  "feedback": "overall feedback about the code"
}"#;
