use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resume text beyond this many characters is cut before it is stored.
pub const MAX_RESUME_CHARS: usize = 5000;
pub const RESUME_TRUNCATION_MARKER: &str = "... [truncated for length]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
}

/// One candidate's interview. Mutated only by appending to `conversation`
/// until an assessment moves it to `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    pub session_id: String,
    pub candidate_name: String,
    pub resume_text: String,
    pub voice_mode: bool,
    pub conversation: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_assessment: Option<Value>,
    #[serde(default)]
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InterviewSession {
    /// A fresh session whose transcript opens with the interviewer's greeting.
    /// `resume_text` is stored as given; see `truncate_resume`.
    pub fn start(
        session_id: String,
        candidate_name: String,
        resume_text: String,
        greeting: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            candidate_name,
            resume_text,
            voice_mode: true,
            conversation: vec![
                ChatMessage::new(Role::System, "Interview Started"),
                ChatMessage::new(Role::Assistant, greeting),
            ],
            final_assessment: None,
            status: SessionStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.conversation.push(ChatMessage::new(role, content));
        self.updated_at = Utc::now();
    }

    pub fn complete(&mut self, assessment: Value) {
        self.final_assessment = Some(assessment);
        self.status = SessionStatus::Completed;
        self.updated_at = Utc::now();
    }
}

/// Cuts `text` to `MAX_RESUME_CHARS` characters and appends the marker.
pub fn truncate_resume(text: String) -> String {
    if text.chars().count() <= MAX_RESUME_CHARS {
        return text;
    }
    let mut cut: String = text.chars().take(MAX_RESUME_CHARS).collect();
    cut.push_str(RESUME_TRUNCATION_MARKER);
    cut
}

/// `interview_<unix-millis>_<8 hex>`
pub fn new_session_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("interview_{}_{}", Utc::now().timestamp_millis(), &suffix[..8])
}
