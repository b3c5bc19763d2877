//! Question normalizer: turns free-form generation output into a `Question`.
//!
//! Never fails. JSON output is read field by field; anything else goes through
//! independent line-anchored section extractors. Every section is optional and
//! a missing one leaves the field at its default.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::llm_client::strip_json_fences;
use crate::questions::models::{question_id, Difficulty, Example, FunctionSignatures, Question};

pub const DEFAULT_TITLE: &str = "Random DSA Problem";
pub const DEFAULT_CATEGORY: &str = "general";

/// Stubs used until (or instead of) generated function signatures.
pub fn placeholder_signatures() -> FunctionSignatures {
    FunctionSignatures::from([
        ("java".to_string(), "// Add your solution here".to_string()),
        ("cpp".to_string(), "// Add your solution here".to_string()),
        ("python".to_string(), "# Add your solution here".to_string()),
    ])
}

/// Parses raw generation text into a fully-populated `Question`.
/// `default_difficulty` is used when the text has no recognizable difficulty.
pub fn parse_question_response(text: &str, default_difficulty: Difficulty) -> Question {
    let body = strip_json_fences(text);

    let mut question = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => from_json(&fields, default_difficulty),
        _ => from_sections(body, default_difficulty),
    };

    if question.title.trim().is_empty() {
        question.title = DEFAULT_TITLE.to_string();
    }
    if question.category.trim().is_empty() {
        question.category = DEFAULT_CATEGORY.to_string();
    }
    question.id = question_id(&question.description);
    question
}

// ────────────────────────────────────────────────────────────────────────────
// JSON path
// ────────────────────────────────────────────────────────────────────────────

type JsonFields = serde_json::Map<String, Value>;

/// Each field is read on its own; a malformed one falls back to its default
/// without disturbing the others.
fn from_json(fields: &JsonFields, default_difficulty: Difficulty) -> Question {
    let text_field = |key: &str| fields.get(key).and_then(Value::as_str).map(str::trim);

    Question {
        id: String::new(),
        title: text_field("title").unwrap_or_default().to_string(),
        difficulty: text_field("difficulty")
            .and_then(Difficulty::parse)
            .unwrap_or(default_difficulty),
        category: text_field("category")
            .map(str::to_lowercase)
            .unwrap_or_default(),
        description: text_field("description")
            .filter(|d| !d.is_empty())
            .or_else(|| text_field("question"))
            .unwrap_or_default()
            .to_string(),
        examples: fields
            .get("examples")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(json_example).collect())
            .unwrap_or_default(),
        constraints: json_constraints(fields.get("constraints")),
        function_signature: placeholder_signatures(),
    }
}

fn json_example(item: &Value) -> Option<Example> {
    let item = item.as_object()?;
    Some(Example {
        input: value_to_text(item.get("input")),
        output: value_to_text(item.get("output")),
        explanation: item
            .get("explanation")
            .and_then(Value::as_str)
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty()),
    })
}

/// Accepts a list of constraints or a single newline-separated string.
fn json_constraints(value: Option<&Value>) -> Vec<String> {
    let lines: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(s)) => s.lines().collect(),
        _ => Vec::new(),
    };
    lines
        .into_iter()
        .map(|c| strip_bullet(c).to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

fn value_to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Labeled-section path
// ────────────────────────────────────────────────────────────────────────────

fn from_sections(text: &str, default_difficulty: Difficulty) -> Question {
    let constraints_start = label_start(constraints_label(), text);

    Question {
        id: String::new(),
        title: single_line(title_re(), text).unwrap_or_default(),
        difficulty: single_line(difficulty_re(), text)
            .as_deref()
            .and_then(Difficulty::parse)
            .unwrap_or(default_difficulty),
        category: single_line(category_re(), text)
            .map(|c| c.to_lowercase())
            .unwrap_or_default(),
        description: extract_description(text),
        examples: extract_examples(text, constraints_start),
        constraints: extract_constraints(text),
        function_signature: placeholder_signatures(),
    }
}

/// First capture of a single-line label, trimmed; empty values count as absent.
fn single_line(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn label_start(re: &Regex, text: &str) -> Option<usize> {
    re.find(text).map(|m| m.start())
}

fn extract_description(text: &str) -> String {
    let Some(label) = question_label().find(text) else {
        return String::new();
    };
    let rest = &text[label.end()..];

    // The statement ends at whichever section comes first.
    let end = [
        examples_heading().find(rest).map(|m| m.start()),
        test_case_re().find(rest).map(|m| m.start()),
        label_start(constraints_label(), rest),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(rest.len());

    rest[..end].trim().to_string()
}

fn extract_examples(text: &str, constraints_start: Option<usize>) -> Vec<Example> {
    let starts: Vec<(usize, usize)> = test_case_re()
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut examples = Vec::with_capacity(starts.len());
    for (i, &(block_start, body_start)) in starts.iter().enumerate() {
        let mut end = starts.get(i + 1).map(|s| s.0).unwrap_or(text.len());
        if let Some(c) = constraints_start.filter(|&c| c > block_start) {
            end = end.min(c);
        }
        let block = &text[body_start..end];

        let Some(output) = output_marker().find(block) else {
            continue;
        };
        let input = block[..output.start()].trim().to_string();
        let after_output = &block[output.end()..];

        let (output_text, explanation) = match explanation_marker().find(after_output) {
            Some(m) => (
                after_output[..m.start()].trim(),
                Some(after_output[m.end()..].trim().to_string()).filter(|e| !e.is_empty()),
            ),
            None => (after_output.trim(), None),
        };

        examples.push(Example {
            input,
            output: output_text.to_string(),
            explanation,
        });
    }
    examples
}

fn extract_constraints(text: &str) -> Vec<String> {
    let Some(label) = constraints_label().find(text) else {
        return Vec::new();
    };
    let rest = text[label.end()..].trim_start_matches([' ', '\t', '*', '_']);
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')).unwrap_or(rest);
    let section = match blank_line().find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    };

    section
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drops a leading list marker. A bare `-` glued to a number is a sign, not a bullet.
fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    ["- ", "* ", "• "]
        .iter()
        .find_map(|bullet| line.strip_prefix(*bullet))
        .map(str::trim)
        .unwrap_or(line)
}

// ────────────────────────────────────────────────────────────────────────────
// Patterns
// ────────────────────────────────────────────────────────────────────────────

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern must compile"))
}

// Labels may be decorated with markdown (`**Title:**`, `## Question:`).
fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?mi)^[ \t>#*_]*Title[*_ \t]*:[*_ \t]*(.*?)[*_ \t\r]*$")
}

fn difficulty_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?mi)^[ \t>#*_]*Difficulty[*_ \t]*:[*_ \t]*(.*?)[*_ \t\r]*$")
}

fn category_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?mi)^[ \t>#*_]*Category[*_ \t]*:[*_ \t]*(.*?)[*_ \t\r]*$")
}

fn question_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?mi)^[ \t>#*_]*Question[*_ \t]*:[*_]*")
}

fn examples_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?mi)^[ \t>#*_]*Example Test Cases")
}

fn constraints_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?mi)^[ \t>#*_]*Constraints[*_ \t]*:")
}

fn test_case_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?i)\d+\.\s+[*_]*Input[*_ \t]*:[*_]*")
}

fn output_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?i)[*_]*Output[*_ \t]*:[*_]*")
}

fn explanation_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?i)[*_]*Explanation[*_ \t]*:[*_]*")
}

fn blank_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"\r?\n[ \t]*\r?\n")
}
