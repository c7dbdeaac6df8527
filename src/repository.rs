// src/repository.rs

use std::collections::HashMap;

use rand::{Rng, seq::SliceRandom};
use validator::Validate;

use crate::{
    catalog::CatalogError,
    models::question::{Difficulty, Question},
};

/// Read-only question bank with an id index.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards, so lookups and sampling need no locking.
#[derive(Debug)]
pub struct QuestionRepository {
    questions: Vec<Question>,
    by_id: HashMap<u32, usize>,
}

impl QuestionRepository {
    /// Validates every question and rejects duplicate ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|e| CatalogError::InvalidQuestion {
                    id: question.id,
                    reason: e.to_string(),
                })?;

            if by_id.insert(question.id, index).is_some() {
                return Err(CatalogError::DuplicateId(question.id));
            }
        }

        Ok(Self { questions, by_id })
    }

    /// The full catalog in its original order.
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.by_id.get(&id).map(|&index| &self.questions[index])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions matching the optional category (case-insensitive) and
    /// difficulty, in catalog order.
    pub fn filter(&self, category: Option<&str>, difficulty: Option<Difficulty>) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| match category {
                Some(wanted) => q
                    .category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(wanted)),
                None => true,
            })
            .filter(|q| difficulty.is_none_or(|d| q.difficulty == d))
            .collect()
    }

    /// Draws `count` distinct questions uniformly at random from the catalog.
    pub fn random_sample<R: Rng + ?Sized>(&self, count: i64, rng: &mut R) -> Vec<&Question> {
        sample_without_replacement(self.questions.iter().collect(), count, rng)
    }
}

/// Uniform ordered selection of `min(count, pool.len())` items via a partial
/// Fisher–Yates shuffle. Non-positive counts yield nothing.
pub fn sample_without_replacement<T, R: Rng + ?Sized>(
    mut pool: Vec<T>,
    count: i64,
    rng: &mut R,
) -> Vec<T> {
    let take = usize::try_from(count).unwrap_or(0).min(pool.len());

    // `partial_shuffle` leaves the drawn items at the tail of the slice.
    pool.partial_shuffle(rng, take);
    pool.split_off(pool.len() - take)
}
