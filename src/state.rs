// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    repository::QuestionRepository,
    store::{InMemoryResultStore, ResultStore},
};

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<QuestionRepository>,
    pub results: Arc<dyn ResultStore>,
    pub config: Config,
}

impl AppState {
    /// State backed by the in-memory result store sized from `config`.
    pub fn new(questions: QuestionRepository, config: Config) -> Self {
        Self {
            questions: Arc::new(questions),
            results: Arc::new(InMemoryResultStore::new(config.result_store_capacity)),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<QuestionRepository> {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ResultStore> {
    fn from_ref(state: &AppState) -> Self {
        state.results.clone()
    }
}
