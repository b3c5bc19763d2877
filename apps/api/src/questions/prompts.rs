// All LLM prompt templates for the Questions module.

/// Question generation prompt.
/// Replace: {difficulty}, {difficulty_label}, {category}, {seed}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Generate a completely new and unique {difficulty}-level DSA question specifically on the topic of {category}.
Make the question original and distinctly different from any typical or common problems in this category.
Use this random seed: {seed} to ensure uniqueness.

The output should be formatted as:

Title: <A Descriptive Title>
Difficulty: {difficulty_label}
Category: {category}

Question: <Problem Statement>

Example Test Cases:

1. Input: <Example Input>
   Output: <Expected Output>
   Explanation: <Step-by-step explanation>

2. Input: <Another Example Input>
   Output: <Expected Output>
   Explanation: <Step-by-step explanation>

Constraints:
- List any constraints on input values
- Time/space complexity requirements"#;

/// Function signature prompt. Replace: {description}
pub const SIGNATURE_PROMPT_TEMPLATE: &str = r#"Based on this problem description:
"{description}"

Generate appropriate function signatures for:
1. Java
2. C++
3. Python

Format the response as JSON:
{
  "java": "public <type> <functionName>(<params>) { // Your code here }",
  "cpp": "<type> <functionName>(<params>) { // Your code here }",
  "python": "def <function_name>(<params>): # Your code here\n    pass"
}

Only return the JSON, nothing else."#;
