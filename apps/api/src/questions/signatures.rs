//! Per-language starter code, generated from the problem statement.

use tracing::warn;

use crate::llm_client::prompts::{fill_template, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_json, TextGenerator};
use crate::questions::models::FunctionSignatures;
use crate::questions::prompts::SIGNATURE_PROMPT_TEMPLATE;

const LANGUAGES: [&str; 3] = ["java", "cpp", "python"];

/// Stubs served when signature generation is unavailable.
pub fn default_signatures() -> FunctionSignatures {
    FunctionSignatures::from([
        (
            "java".to_string(),
            "public void solution() {\n    // Add your solution here\n}".to_string(),
        ),
        (
            "cpp".to_string(),
            "void solution() {\n    // Add your solution here\n}".to_string(),
        ),
        (
            "python".to_string(),
            "def solution():\n    # Add your solution here\n    pass".to_string(),
        ),
    ])
}

/// Asks the generator for starter code. Best-effort: any failure, or an answer
/// missing one of the three languages, yields `default_signatures()` for the gaps.
pub async fn generate_function_signatures(
    generator: &dyn TextGenerator,
    description: &str,
) -> FunctionSignatures {
    let mut signatures = default_signatures();
    if description.trim().is_empty() {
        return signatures;
    }

    let prompt = fill_template(SIGNATURE_PROMPT_TEMPLATE, &[("description", description)]);
    match generate_json::<FunctionSignatures>(generator, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(generated) => {
            for (language, code) in generated {
                let language = language.trim().to_ascii_lowercase();
                if LANGUAGES.contains(&language.as_str()) && !code.trim().is_empty() {
                    signatures.insert(language, code);
                }
            }
        }
        Err(e) => warn!("Function signature generation failed, using defaults: {e}"),
    }
    signatures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{failing, ScriptedGenerator};

    #[tokio::test]
    async fn test_generated_signatures_are_used() {
        let generator = ScriptedGenerator::new(|_| {
            Ok(r#"```json
{"java": "public int f(int[] a) {}", "cpp": "int f(vector<int>& a) {}", "python": "def f(a):\n    pass"}
```"#
                .to_string())
        });
        let sigs = generate_function_signatures(&generator, "Sum an array.").await;
        assert_eq!(sigs["java"], "public int f(int[] a) {}");
        assert_eq!(sigs["python"], "def f(a):\n    pass");
    }

    #[tokio::test]
    async fn test_partial_answer_keeps_defaults_for_gaps() {
        let generator =
            ScriptedGenerator::new(|_| Ok(r#"{"Python": "def g(): pass", "rust": "fn g() {}"}"#.into()));
        let sigs = generate_function_signatures(&generator, "Do g.").await;
        assert_eq!(sigs["python"], "def g(): pass");
        assert_eq!(sigs["java"], default_signatures()["java"]);
        assert!(!sigs.contains_key("rust"));
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_defaults() {
        let sigs = generate_function_signatures(&failing(), "Anything").await;
        assert_eq!(sigs, default_signatures());
    }

    #[tokio::test]
    async fn test_empty_description_skips_the_call() {
        let generator = ScriptedGenerator::new(|_| Ok("{}".into()));
        let sigs = generate_function_signatures(&generator, "   ").await;
        assert_eq!(sigs, default_signatures());
        assert_eq!(generator.prompt_count(), 0);
    }
}
