// Shared prompt constants.
// Each feature module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for plain-text generation where the prompt itself dictates the format.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a helpful assistant for software engineering \
    interview preparation. Follow the requested output format exactly.";

/// Name the interviewer uses for itself in every interview prompt.
pub const INTERVIEWER_NAME: &str = "TechInterviewer";

/// Appended to every prompt whose output is read aloud.
pub const SPOKEN_STYLE_INSTRUCTION: &str = "\
    Use short, clear sentences that are easy to speak aloud. \
    Do NOT use markdown, bullet points, code blocks or emoji.";

/// Fills `{key}` placeholders in a single pass. Inserted values are never
/// rescanned, and `{...}` text with no matching key is left as is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let known = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, *value))
        });
        match known {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_replaces_known_keys() {
        let filled = fill_template("{a} and {b}, {a} again", &[("a", "1"), ("b", "2")]);
        assert_eq!(filled, "1 and 2, 1 again");
    }

    #[test]
    fn test_fill_template_keeps_literal_braces() {
        let filled = fill_template(r#"{"passed": true} for {lang} {"#, &[("lang", "rust")]);
        assert_eq!(filled, r#"{"passed": true} for rust {"#);
    }

    #[test]
    fn test_inserted_values_are_not_expanded() {
        let filled = fill_template(
            "Name: {name}\nResume: {resume}",
            &[("name", "{resume}"), ("resume", "Rust dev")],
        );
        assert_eq!(filled, "Name: {resume}\nResume: Rust dev");
    }
}
