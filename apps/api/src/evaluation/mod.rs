// Code evaluation: single test case runs and full submissions, judged by the LLM.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod prompts;
