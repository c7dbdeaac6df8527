// src/handlers/question.rs

use std::sync::Arc;

use axum::extract::{
    Path, Query, State,
    rejection::{PathRejection, QueryRejection},
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        question::{Difficulty, Question},
        response::ApiResponse,
    },
    repository::{QuestionRepository, sample_without_replacement},
};

/// Number of questions drawn when the client does not ask for a count.
pub const DEFAULT_SAMPLE_SIZE: i64 = 10;

/// Query parameters for listing questions.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Only the exact value `true` asks for a random sample; anything else
    /// lists the whole (filtered) catalog.
    pub random: Option<String>,
    /// Sample size when `random=true`. Clamped to the catalog size; zero or
    /// negative yields an empty list.
    pub count: Option<i64>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// Lists the catalog, optionally filtered and randomly sampled.
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    tag = "questions",
    params(ListParams),
    responses(
        (status = 200, description = "Questions with their total"),
        (status = 400, description = "Unparseable query parameters")
    )
)]
pub async fn list_questions(
    State(questions): State<Arc<QuestionRepository>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<ApiResponse<Vec<Question>>, AppError> {
    let Query(params) = params?;

    let pool = questions.filter(params.category.as_deref(), params.difficulty);

    let selected = if params.random.as_deref() == Some("true") {
        let count = params.count.unwrap_or(DEFAULT_SAMPLE_SIZE);
        sample_without_replacement(pool, count, &mut rand::thread_rng())
    } else {
        pool
    };

    Ok(ApiResponse::list(selected.into_iter().cloned().collect()))
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RandomParams {
    /// Between 1 and 50, default 10.
    #[validate(range(min = 1, max = 50))]
    pub count: Option<i64>,
}

/// Draws a random set of distinct questions.
#[utoipa::path(
    get,
    path = "/api/v1/questions/random",
    tag = "questions",
    params(RandomParams),
    responses(
        (status = 200, description = "Randomly ordered questions"),
        (status = 400, description = "Count outside 1..=50")
    )
)]
pub async fn random_questions(
    State(questions): State<Arc<QuestionRepository>>,
    params: Result<Query<RandomParams>, QueryRejection>,
) -> Result<ApiResponse<Vec<Question>>, AppError> {
    let Query(params) = params?;
    params.validate().map_err(|_| {
        AppError::BadRequest("Invalid count parameter. Must be between 1 and 50".to_string())
    })?;

    let count = params.count.unwrap_or(DEFAULT_SAMPLE_SIZE);
    let sample: Vec<Question> = questions
        .random_sample(count, &mut rand::thread_rng())
        .into_iter()
        .cloned()
        .collect();

    Ok(ApiResponse::list(sample).with_message("Random questions retrieved successfully"))
}

/// Retrieves a single question by ID.
#[utoipa::path(
    get,
    path = "/api/v1/questions/{id}",
    tag = "questions",
    params(("id" = u32, Path, description = "Question id")),
    responses(
        (status = 200, description = "The question", body = Question),
        (status = 404, description = "No question with this id")
    )
)]
pub async fn get_question(
    State(questions): State<Arc<QuestionRepository>>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<ApiResponse<Question>, AppError> {
    let Path(id) = id?;

    let question = questions
        .get(id)
        .cloned()
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(ApiResponse::ok(question))
}
