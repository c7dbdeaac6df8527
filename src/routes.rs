// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    docs,
    error::AppError,
    handlers::{health, question, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Nests the question and quiz routes under `/api/v1`.
/// * Applies global middleware (Trace, CORS).
/// * Unknown paths get the JSON error envelope.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE]);

    let question_routes = Router::new()
        .route("/", get(question::list_questions))
        .route("/random", get(question::random_questions))
        .route("/{id}", get(question::get_question));

    let quiz_routes = Router::new()
        .route("/submit", post(quiz::submit_quiz))
        .route("/results/{id}", get(quiz::get_result))
        .route("/stats", get(quiz::get_stats));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .nest("/api/v1/questions", question_routes)
        .nest("/api/v1/quiz", quiz_routes)
        .fallback(|| async { AppError::NotFound("Route not found".to_string()) })
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
