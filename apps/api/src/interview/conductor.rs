//! Interviewer turns: opening greeting, follow-up questions, closing assessment.
//!
//! Each turn is one generation call. A failed call is replaced by a canned
//! line so the interview can always continue.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::interview::models::{ChatMessage, InterviewSession, Role};
use crate::interview::prompts::{
    ASSESSMENT_PROMPT_TEMPLATE, NEXT_QUESTION_PROMPT_TEMPLATE, OPENING_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{
    fill_template, INTERVIEWER_NAME, JSON_ONLY_SYSTEM, PLAIN_TEXT_SYSTEM,
    SPOKEN_STYLE_INSTRUCTION,
};
use crate::llm_client::{strip_json_fences, TextGenerator};

/// Messages of recent context given to the follow-up prompt.
pub const RECENT_MESSAGES: usize = 5;
const RESUME_HIGHLIGHT_CHARS: usize = 500;
const ASSESSMENT_RESUME_CHARS: usize = 1000;

pub const FALLBACK_NEXT_QUESTION: &str = "That's interesting. I'm curious - could you tell me \
    more about a challenging project you've worked on recently?";

pub fn fallback_greeting(name: &str) -> String {
    format!(
        "Hello, {name}! I'm {INTERVIEWER_NAME}, an AI assistant. Let's begin our technical \
         interview. Could you tell me a bit about your background?"
    )
}

fn fallback_assessment(name: &str) -> Value {
    json!({
        "text_assessment": format!(
            "Assessment for {name}: Thank you for participating in this technical interview. \
             You showed promising skills, and I recommend further evaluation to make a \
             complete assessment."
        )
    })
}

fn head_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

/// Renders non-system messages as `<speaker>: <content>` paragraphs.
fn render_transcript<'a>(
    messages: impl IntoIterator<Item = &'a ChatMessage>,
    assistant: &str,
    candidate: &str,
) -> String {
    messages
        .into_iter()
        .filter(|m| m.role != Role::System)
        .map(|m| {
            let speaker = if m.role == Role::Assistant { assistant } else { candidate };
            format!("{speaker}: {}\n\n", m.content)
        })
        .collect()
}

pub async fn opening_message(
    generator: &dyn TextGenerator,
    name: &str,
    resume_text: &str,
) -> String {
    let prompt = fill_template(
        OPENING_PROMPT_TEMPLATE,
        &[
            ("interviewer", INTERVIEWER_NAME),
            ("name", name),
            ("spoken_style", SPOKEN_STYLE_INSTRUCTION),
            ("resume", resume_text),
        ],
    );

    match generator.generate(&prompt, PLAIN_TEXT_SYSTEM).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Error initializing interview for '{name}': {e}");
            fallback_greeting(name)
        }
    }
}

/// The interviewer's reply to the latest candidate message. The last
/// `RECENT_MESSAGES` entries of the transcript are used, system lines skipped.
pub async fn next_question(generator: &dyn TextGenerator, session: &InterviewSession) -> String {
    let recent = &session.conversation
        [session.conversation.len().saturating_sub(RECENT_MESSAGES)..];
    let conversation = render_transcript(recent, "You", &session.candidate_name);

    let prompt = fill_template(
        NEXT_QUESTION_PROMPT_TEMPLATE,
        &[
            ("interviewer", INTERVIEWER_NAME),
            ("name", session.candidate_name.as_str()),
            ("spoken_style", SPOKEN_STYLE_INSTRUCTION),
            (
                "resume_highlights",
                head_chars(&session.resume_text, RESUME_HIGHLIGHT_CHARS).as_str(),
            ),
            ("conversation", conversation.as_str()),
        ],
    );

    match generator.generate(&prompt, PLAIN_TEXT_SYSTEM).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Error generating next question for {}: {e}", session.session_id);
            FALLBACK_NEXT_QUESTION.to_string()
        }
    }
}

/// Closing assessment over the whole transcript: the parsed JSON object when
/// the model returns one, otherwise `{"text_assessment": <text>}`.
pub async fn final_assessment(generator: &dyn TextGenerator, session: &InterviewSession) -> Value {
    let conversation = render_transcript(
        &session.conversation,
        INTERVIEWER_NAME,
        &session.candidate_name,
    );
    let prompt = fill_template(
        ASSESSMENT_PROMPT_TEMPLATE,
        &[
            ("interviewer", INTERVIEWER_NAME),
            ("name", session.candidate_name.as_str()),
            (
                "resume",
                head_chars(&session.resume_text, ASSESSMENT_RESUME_CHARS).as_str(),
            ),
            ("conversation", conversation.as_str()),
        ],
    );

    match generator.generate(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(text) => {
            debug!("Raw assessment for {}:\n{text}", session.session_id);
            parse_assessment(&text)
        }
        Err(e) => {
            warn!("Error generating final assessment for {}: {e}", session.session_id);
            fallback_assessment(&session.candidate_name)
        }
    }
}

pub fn parse_assessment(text: &str) -> Value {
    match serde_json::from_str::<Value>(strip_json_fences(text)) {
        Ok(value @ Value::Object(_)) => value,
        _ => json!({ "text_assessment": text }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{failing, ScriptedGenerator};

    fn session_with_turns(turns: usize) -> InterviewSession {
        let mut s = InterviewSession::start(
            "s1".into(),
            "Ada".into(),
            "r".repeat(2000),
            "Hello Ada".into(),
        );
        for i in 0..turns {
            s.push(Role::User, format!("answer {i}"));
            s.push(Role::Assistant, format!("question {i}"));
        }
        s
    }

    #[tokio::test]
    async fn test_opening_falls_back_to_greeting() {
        let text = opening_message(&failing(), "Ada", "").await;
        assert_eq!(text, fallback_greeting("Ada"));
        assert!(text.starts_with("Hello, Ada! I'm TechInterviewer"));
    }

    #[tokio::test]
    async fn test_opening_prompt_includes_resume() {
        let generator = ScriptedGenerator::new(|_| Ok("Hi there! Tell me about Rust.".into()));
        let text = opening_message(&generator, "Ada", "Built a compiler").await;

        assert_eq!(text, "Hi there! Tell me about Rust.");
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("interview with Ada"));
        assert!(prompts[0].contains("Built a compiler"));
    }

    #[tokio::test]
    async fn test_placeholder_in_name_is_not_expanded() {
        let generator = ScriptedGenerator::new(|_| Ok("Hi!".into()));
        opening_message(&generator, "{resume}", "SECRET-RESUME").await;

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("interview with {resume}"));
        assert_eq!(prompts[0].matches("SECRET-RESUME").count(), 1);
    }

    #[tokio::test]
    async fn test_next_question_uses_recent_window() {
        let generator = ScriptedGenerator::new(|_| Ok("Next?".into()));
        let session = session_with_turns(4);

        assert_eq!(next_question(&generator, &session).await, "Next?");

        let prompts = generator.prompts.lock().unwrap();
        let prompt = &prompts[0];
        assert!(prompt.contains("Ada: answer 3"));
        assert!(prompt.contains("You: question 3"));
        assert!(!prompt.contains("answer 0"));
        assert!(!prompt.contains("Interview Started"));
        assert!(prompt.contains(&format!("{}...", "r".repeat(RESUME_HIGHLIGHT_CHARS))));
        assert!(!prompt.contains(&"r".repeat(RESUME_HIGHLIGHT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_next_question_fallback() {
        let text = next_question(&failing(), &session_with_turns(1)).await;
        assert_eq!(text, FALLBACK_NEXT_QUESTION);
    }

    #[tokio::test]
    async fn test_assessment_json_is_kept() {
        let generator = ScriptedGenerator::new(|_| {
            Ok("```json\n{\"overall_impression\": \"strong\"}\n```".into())
        });
        let value = final_assessment(&generator, &session_with_turns(1)).await;
        assert_eq!(value, json!({"overall_impression": "strong"}));
    }

    #[tokio::test]
    async fn test_assessment_prose_is_wrapped() {
        let generator = ScriptedGenerator::new(|_| Ok("Ada did well overall.".into()));
        let value = final_assessment(&generator, &session_with_turns(1)).await;
        assert_eq!(value, json!({"text_assessment": "Ada did well overall."}));
    }

    #[tokio::test]
    async fn test_assessment_failure_is_canned() {
        let value = final_assessment(&failing(), &session_with_turns(0)).await;
        let text = value["text_assessment"].as_str().unwrap();
        assert!(text.starts_with("Assessment for Ada:"));
    }
}
