// src/store.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::quiz::{QuizResult, QuizStats, Scorecard},
};

/// Keeps scored results so they can be fetched again by id.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Assigns an id and timestamp to `scorecard` and stores it.
    async fn save(&self, user_id: Option<String>, scorecard: Scorecard) -> Result<QuizResult, AppError>;

    async fn get(&self, id: u64) -> Result<Option<QuizResult>, AppError>;

    async fn stats(&self) -> Result<QuizStats, AppError>;
}

/// Process-local store. Results vanish on restart; once `capacity` is
/// reached the oldest result is evicted.
pub struct InMemoryResultStore {
    capacity: usize,
    inner: RwLock<Inner>,
}

struct Inner {
    next_id: u64,
    results: BTreeMap<u64, QuizResult>,
}

impl InMemoryResultStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: RwLock::new(Inner {
                next_id: 1,
                results: BTreeMap::new(),
            }),
        }
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn save(&self, user_id: Option<String>, scorecard: Scorecard) -> Result<QuizResult, AppError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let result = QuizResult {
            id,
            user_id,
            scorecard,
            created_at: Utc::now(),
        };

        while inner.results.len() >= self.capacity {
            if let Some((evicted, _)) = inner.results.pop_first() {
                tracing::debug!(result_id = evicted, "Evicted oldest quiz result");
            }
        }
        inner.results.insert(id, result.clone());

        Ok(result)
    }

    async fn get(&self, id: u64) -> Result<Option<QuizResult>, AppError> {
        Ok(self.inner.read().await.results.get(&id).cloned())
    }

    async fn stats(&self) -> Result<QuizStats, AppError> {
        Ok(QuizStats::from_results(self.inner.read().await.results.values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::Grade;

    fn card(score: u32) -> Scorecard {
        Scorecard {
            score,
            total_questions: 4,
            percentage: crate::scoring::percentage(score, 4),
            correct_answers: score,
            wrong_answers: 4 - score,
            grade: Grade::from_percentage(crate::scoring::percentage(score, 4)),
            time_spent: 1000,
            answers: Vec::new(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_retrievable() {
        let store = InMemoryResultStore::new(10);
        let first = store.save(Some("a".to_string()), card(1)).await.unwrap();
        let second = store.save(None, card(3)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let fetched = store.get(1).await.unwrap().unwrap();
        assert_eq!(fetched, first);
        assert_eq!(fetched.user_id.as_deref(), Some("a"));
        assert!(store.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn oldest_result_is_evicted_at_capacity() {
        let store = InMemoryResultStore::new(2);
        for score in [1, 2, 3] {
            store.save(None, card(score)).await.unwrap();
        }

        assert!(store.get(1).await.unwrap().is_none());
        assert!(store.get(2).await.unwrap().is_some());
        assert!(store.get(3).await.unwrap().is_some());
        assert_eq!(store.stats().await.unwrap().total_submissions, 2);
    }

    #[tokio::test]
    async fn stats_reflect_stored_results() {
        let store = InMemoryResultStore::new(10);
        assert_eq!(store.stats().await.unwrap(), QuizStats::default());

        store.save(None, card(4)).await.unwrap();
        store.save(None, card(2)).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_submissions, 2);
        assert_eq!(stats.highest_score, 4);
        assert_eq!(stats.lowest_score, 2);
        assert_eq!(stats.average_percentage, 75.0);
        assert_eq!(stats.average_time, 1000.0);
    }
}
