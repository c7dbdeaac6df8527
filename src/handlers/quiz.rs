// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        quiz::{QuizResult, QuizStats, SubmitQuizRequest, SubmitQuizResponse},
        response::ApiResponse,
    },
    repository::QuestionRepository,
    scoring,
    store::ResultStore,
};

/// Scores a finished attempt and keeps the result.
///
/// * Accepts keyed (`{"1": 2}`) or list (`[{questionId, selectedAnswer}]`) answers.
/// * Answers for unknown question ids are ignored.
/// * Responds with the full result plus `resultId` for later retrieval.
#[utoipa::path(
    post,
    path = "/api/v1/quiz/submit",
    tag = "quiz",
    request_body = SubmitQuizRequest,
    responses(
        (status = 200, description = "Scored result", body = SubmitQuizResponse),
        (status = 400, description = "Malformed request body"),
        (status = 422, description = "Request failed validation")
    )
)]
pub async fn submit_quiz(
    State(questions): State<Arc<QuestionRepository>>,
    State(results): State<Arc<dyn ResultStore>>,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> Result<ApiResponse<SubmitQuizResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let (user_id, submission) = req.into_submission()?;
    let scorecard = scoring::score(&questions, &submission);
    let result = results.save(user_id, scorecard).await?;

    tracing::info!(
        result_id = result.id,
        score = result.scorecard.score,
        total = result.scorecard.total_questions,
        "Quiz submitted"
    );

    Ok(ApiResponse::ok(SubmitQuizResponse {
        result_id: result.id,
        result,
    })
    .with_message("Quiz submitted successfully"))
}

/// Retrieves a previously scored result.
#[utoipa::path(
    get,
    path = "/api/v1/quiz/results/{id}",
    tag = "quiz",
    params(("id" = u64, Path, description = "Result id returned by submit")),
    responses(
        (status = 200, description = "Stored result", body = QuizResult),
        (status = 404, description = "Unknown or evicted result")
    )
)]
pub async fn get_result(
    State(results): State<Arc<dyn ResultStore>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<ApiResponse<QuizResult>, AppError> {
    let Path(id) = id?;

    let result = results
        .get(id)
        .await?
        .ok_or(AppError::NotFound("Quiz result not found".to_string()))?;

    Ok(ApiResponse::ok(result))
}

/// Aggregates over every stored result.
#[utoipa::path(
    get,
    path = "/api/v1/quiz/stats",
    tag = "quiz",
    responses((status = 200, description = "Submission statistics", body = QuizStats))
)]
pub async fn get_stats(
    State(results): State<Arc<dyn ResultStore>>,
) -> Result<ApiResponse<QuizStats>, AppError> {
    Ok(ApiResponse::ok(results.stats().await?))
}
