// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    handlers::{health, question, quiz},
    models::{
        question::{Difficulty, Question},
        quiz::{AnswerDetail, Grade, QuizResult, QuizStats, Scorecard, SubmitQuizRequest, SubmitQuizResponse},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "RDS Quiz API", description = "AWS RDS/Aurora quiz questions and scoring"),
    paths(
        health::health_check,
        question::list_questions,
        question::random_questions,
        question::get_question,
        quiz::submit_quiz,
        quiz::get_result,
        quiz::get_stats,
    ),
    components(schemas(
        Question,
        Difficulty,
        SubmitQuizRequest,
        SubmitQuizResponse,
        QuizResult,
        Scorecard,
        AnswerDetail,
        Grade,
        QuizStats,
        health::HealthStatus,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "questions", description = "Question catalog and sampling"),
        (name = "quiz", description = "Submission scoring and results"),
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
