// src/main.rs

use rds_quiz_backend::catalog;
use rds_quiz_backend::config::Config;
use rds_quiz_backend::repository::QuestionRepository;
use rds_quiz_backend::routes;
use rds_quiz_backend::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment (.env included)
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "quiz.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Load and validate the question catalog; an invalid catalog is fatal
    let questions = catalog::load(config.catalog_path.as_deref())
        .and_then(QuestionRepository::new)
        .unwrap_or_else(|e| panic!("Failed to load question catalog: {}", e));

    tracing::info!("Question catalog loaded ({} questions)", questions.len());

    let addr = config.socket_addr();
    let state = AppState::new(questions, config);

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", addr, e));

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
