// src/handlers/attempts.rs

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    config::DEFAULT_ATTEMPTS_LIMIT,
    error::AppError,
    grading::Grader,
    models::attempt::{ListAttemptsParams, QuizAttempt, SubmitAttemptRequest},
    store::SqliteStore,
};

/// Submits answers for a quiz, grades them and records the attempt.
///
/// * `answers` is matched to the quiz's questions by position.
/// * Returns the score, pass/fail and a per-question breakdown.
pub async fn submit_attempt(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SubmitAttemptRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(quiz_id) = path?;
    let Json(req) = payload?;

    let grader = Grader::new(SqliteStore::new(pool));
    let result = grader.submit(quiz_id, req).await?;

    Ok(Json(result))
}

/// Lists attempts for a quiz, most recent first.
pub async fn list_attempts(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<ListAttemptsParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(quiz_id) = path?;
    let Query(params) = query?;
    let limit = params.limit.unwrap_or(DEFAULT_ATTEMPTS_LIMIT).clamp(1, 500);
    let offset = params.offset.unwrap_or(0).max(0);

    let attempts = sqlx::query_as::<_, QuizAttempt>(
        r#"
        SELECT * FROM quiz_attempts
        WHERE quiz_id = ?
        ORDER BY completed_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(quiz_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list attempts for quiz {}: {:?}", quiz_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(attempts))
}
