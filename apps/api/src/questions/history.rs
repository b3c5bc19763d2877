//! File-backed served-question and category history, plus the question cache.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::questions::diversity::push_category;
use crate::questions::models::Question;
use crate::storage::{read_json_opt, write_json_atomic};

/// Number of trailing served ids that count as "recent" for dedup.
pub const LIVE_QUESTION_WINDOW: usize = 10;

const QUESTION_HISTORY_FILE: &str = "question_history.json";
const CATEGORY_HISTORY_FILE: &str = "category_history.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct QuestionHistory {
    #[serde(default)]
    served_questions: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CategoryHistory {
    #[serde(default)]
    recent_categories: Vec<String>,
}

/// Owns the question cache directory. All read-modify-write cycles on the
/// history files go through one async mutex.
pub struct HistoryStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    /// The last `LIVE_QUESTION_WINDOW` served question ids, oldest first.
    pub async fn recent_question_ids(&self) -> Vec<String> {
        let _guard = self.lock.lock().await;
        let history = self.load_questions().await;
        let served = history.served_questions;
        let start = served.len().saturating_sub(LIVE_QUESTION_WINDOW);
        served[start..].to_vec()
    }

    /// The retained category history (at most ten entries), oldest first.
    pub async fn recent_categories(&self) -> Vec<String> {
        let _guard = self.lock.lock().await;
        self.load_categories().await.recent_categories
    }

    /// Caches the question and appends it to both histories.
    pub async fn record_served(&self, question: &Question) -> Result<()> {
        let _guard = self.lock.lock().await;

        let cache_path = self.dir.join(format!("question_{}.json", question.id));
        write_json_atomic(&cache_path, question).await?;

        let mut questions = self.load_questions().await;
        questions.served_questions.push(question.id.clone());
        write_json_atomic(&self.dir.join(QUESTION_HISTORY_FILE), &questions).await?;

        let mut categories = self.load_categories().await;
        push_category(&mut categories.recent_categories, &question.category);
        write_json_atomic(&self.dir.join(CATEGORY_HISTORY_FILE), &categories).await?;

        debug!(
            "Recorded question {} ({}) in history",
            question.id, question.category
        );
        Ok(())
    }

    async fn load_questions(&self) -> QuestionHistory {
        load_or_default(&self.dir.join(QUESTION_HISTORY_FILE)).await
    }

    async fn load_categories(&self) -> CategoryHistory {
        load_or_default(&self.dir.join(CATEGORY_HISTORY_FILE)).await
    }
}

/// An unreadable history file counts as empty; the next write replaces it.
async fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_json_opt(path).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            warn!("Ignoring unreadable history file: {e:#}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::models::{question_id, Difficulty};
    use crate::questions::normalizer::placeholder_signatures;

    fn question(description: &str, category: &str) -> Question {
        Question {
            id: question_id(description),
            title: "T".to_string(),
            difficulty: Difficulty::Easy,
            category: category.to_string(),
            description: description.to_string(),
            examples: vec![],
            constraints: vec![],
            function_signature: placeholder_signatures(),
        }
    }

    #[tokio::test]
    async fn test_fresh_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        assert!(store.recent_question_ids().await.is_empty());
        assert!(store.recent_categories().await.is_empty());
    }

    #[tokio::test]
    async fn test_record_served_updates_histories_and_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        let q = question("Find the peak.", "arrays");

        store.record_served(&q).await.unwrap();

        assert_eq!(store.recent_question_ids().await, vec![q.id.clone()]);
        assert_eq!(store.recent_categories().await, vec!["arrays"]);
        let cached: Option<Question> =
            read_json_opt(&dir.path().join(format!("question_{}.json", q.id)))
                .await
                .unwrap();
        assert_eq!(cached, Some(q));
    }

    #[tokio::test]
    async fn test_only_last_ten_ids_are_live_but_history_is_append_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path());
        for i in 0..12 {
            store
                .record_served(&question(&format!("desc {i}"), "graphs"))
                .await
                .unwrap();
        }

        let live = store.recent_question_ids().await;
        assert_eq!(live.len(), LIVE_QUESTION_WINDOW);
        assert_eq!(live[0], question_id("desc 2"));

        let raw: QuestionHistory = read_json_opt(&dir.path().join(QUESTION_HISTORY_FILE))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw.served_questions.len(), 12);
        assert_eq!(store.recent_categories().await.len(), 10);
    }

    #[tokio::test]
    async fn test_corrupt_history_files_read_as_empty_and_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(QUESTION_HISTORY_FILE), b"{not json")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join(CATEGORY_HISTORY_FILE), b"[")
            .await
            .unwrap();
        let store = HistoryStore::new(dir.path());

        assert!(store.recent_question_ids().await.is_empty());
        assert!(store.recent_categories().await.is_empty());

        let q = question("Merge intervals.", "intervals");
        store.record_served(&q).await.unwrap();
        assert_eq!(store.recent_question_ids().await, vec![q.id]);
        assert_eq!(store.recent_categories().await, vec!["intervals"]);
    }
}
