// Practice question generation.
// Implements: category diversity, generation, normalization, dedup, history.
// All LLM calls go through llm_client, no direct API calls here.

pub mod diversity;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod history;
pub mod models;
pub mod normalizer;
pub mod prompts;
pub mod signatures;
