// Spoken technical interview: resume intake, interviewer turns, final assessment.
// Sessions are persisted through the `sessions` store; audio through `speech`.

pub mod conductor;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod resume;
