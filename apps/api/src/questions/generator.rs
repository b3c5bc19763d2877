//! Question generation pipeline.
//!
//! Flow: pick category → prompt → normalize → dedup against recent ids
//!       (bounded regeneration) → function signatures → record in history.

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::llm_client::prompts::{fill_template, PLAIN_TEXT_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::questions::diversity::{select_category, DSA_CATEGORIES};
use crate::questions::fallback::fallback_question;
use crate::questions::history::HistoryStore;
use crate::questions::models::{Difficulty, Question};
use crate::questions::normalizer::{parse_question_response, DEFAULT_CATEGORY};
use crate::questions::prompts::QUESTION_PROMPT_TEMPLATE;
use crate::questions::signatures::generate_function_signatures;

/// Total generation attempts per request when the result duplicates a recent question.
pub const MAX_GENERATION_ATTEMPTS: u32 = 3;

pub fn build_question_prompt(difficulty: Difficulty, category: &str, seed: u32) -> String {
    fill_template(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("difficulty_label", difficulty.as_str()),
            ("difficulty", difficulty.as_str().to_lowercase().as_str()),
            ("category", category),
            ("seed", seed.to_string().as_str()),
        ],
    )
}

/// Produces the next question for `difficulty`.
///
/// Upstream failures never surface: a failed generation call falls back to a
/// canned question and unreadable history counts as empty. Only errors
/// recording the served question are returned.
pub async fn get_random_problem(
    generator: &dyn TextGenerator,
    history: &HistoryStore,
    difficulty: Difficulty,
) -> Result<Question> {
    let recent_ids = history.recent_question_ids().await;
    let recent_categories = history.recent_categories().await;

    let category = select_category(&DSA_CATEGORIES, &recent_categories, &mut rand::thread_rng())
        .unwrap_or(DEFAULT_CATEGORY);
    info!("Generating {difficulty} question in category '{category}'");

    let mut candidate: Option<Question> = None;
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let seed: u32 = rand::thread_rng().gen_range(1..=10_000);
        let prompt = build_question_prompt(difficulty, category, seed);

        let text = match generator.generate(&prompt, PLAIN_TEXT_SYSTEM).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Question generation failed on attempt {attempt}: {e}");
                break;
            }
        };

        let mut question = parse_question_response(&text, difficulty);
        question.category = category.to_string();
        debug!(
            "Normalized question id={} title={:?} examples={} from raw response:\n{}",
            question.id,
            question.title,
            question.examples.len(),
            text
        );

        let duplicate = recent_ids.contains(&question.id);
        candidate = Some(question);
        if !duplicate {
            break;
        }
        if attempt < MAX_GENERATION_ATTEMPTS {
            warn!("Generated question duplicates a recent one, regenerating (attempt {attempt})");
        } else {
            warn!("Still duplicating after {MAX_GENERATION_ATTEMPTS} attempts, serving it anyway");
        }
    }

    let question = match candidate {
        Some(mut question) => {
            question.function_signature =
                generate_function_signatures(generator, &question.description).await;
            question
        }
        None => {
            warn!("Serving fallback question for category '{category}'");
            fallback_question(category, difficulty)
        }
    };

    history.record_served(&question).await?;
    Ok(question)
}
