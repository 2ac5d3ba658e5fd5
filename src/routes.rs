// src/routes.rs

use axum::{
    Json, Router,
    handler::HandlerWithoutStateExt,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{analytics, attempts, questions, quizzes},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts the question, quiz, attempt and analytics APIs under `/api`.
/// * Serves static files from the configured directory for everything else.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let question_routes = Router::new()
        .route("/", get(questions::list_questions).post(questions::create_question))
        .route(
            "/{id}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        );

    let quiz_routes = Router::new()
        .route("/", get(quizzes::list_quizzes).post(quizzes::create_quiz))
        .route(
            "/{id}",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route("/{id}/questions", post(quizzes::add_question_to_quiz))
        .route(
            "/{id}/questions/{question_id}",
            delete(quizzes::remove_question_from_quiz),
        )
        .route("/{id}/submit", post(attempts::submit_attempt))
        .route("/{id}/attempts", get(attempts::list_attempts));

    let analytics_routes = Router::new()
        .route("/leaderboard", get(analytics::global_leaderboard))
        .route("/leaderboard/{quiz_id}", get(analytics::quiz_leaderboard))
        .route("/stats/quiz", get(analytics::all_quiz_stats))
        .route("/stats/quiz/{id}", get(analytics::quiz_stats))
        .route("/categories", get(analytics::list_categories));

    let static_files =
        ServeDir::new(&state.config.static_dir).not_found_service(route_not_found.into_service());

    Router::new()
        .nest("/api/questions", question_routes)
        .nest("/api/quizzes", quiz_routes)
        .nest("/api", analytics_routes)
        .fallback_service(static_files)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Route not found"})),
    )
}
