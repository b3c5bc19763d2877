use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Difficulty of a practice question. Serialized capitalized ("Easy").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive parse of "easy" / "medium" / "hard". Anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One worked example attached to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
    pub explanation: Option<String>,
}

/// Language name ("java", "cpp", "python") → starter code.
pub type FunctionSignatures = BTreeMap<String, String>;

/// A generated practice question, as served by `GET /get_question`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Content hash of `description`.
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub description: String,
    pub examples: Vec<Example>,
    pub constraints: Vec<String>,
    pub function_signature: FunctionSignatures,
}

/// Deterministic id for a question: lowercase hex SHA-256 of the description.
pub fn question_id(description: &str) -> String {
    hex::encode(Sha256::digest(description.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse("MEDIUM"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse(" hard "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("expert"), None);
    }

    #[test]
    fn test_difficulty_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"Medium\"");
    }

    #[test]
    fn test_question_id_is_deterministic() {
        let a = question_id("Reverse a linked list.");
        let b = question_id("Reverse a linked list.");
        let c = question_id("Reverse a doubly linked list.");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
