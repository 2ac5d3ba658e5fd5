// src/handlers/analytics.rs

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    config::DEFAULT_LEADERBOARD_LIMIT,
    error::AppError,
    models::{
        category::Category,
        stats::{LeaderboardEntry, LeaderboardParams, QuizStats},
    },
};

fn leaderboard_limit(params: &LeaderboardParams) -> i64 {
    params.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT).clamp(1, 100)
}

/// Top passed attempts across all quizzes, ranked within each quiz.
pub async fn global_leaderboard(
    State(pool): State<SqlitePool>,
    query: Result<Query<LeaderboardParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query?;
    let entries = sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT qa.quiz_id, qa.participant_name, q.quiz_name, qa.score, qa.percentage,
               qa.time_taken, qa.completed_at,
               RANK() OVER (PARTITION BY qa.quiz_id ORDER BY qa.percentage DESC, qa.time_taken ASC) AS rank
        FROM quiz_attempts qa
        JOIN quizzes q ON qa.quiz_id = q.id
        WHERE qa.passed = 1
        ORDER BY qa.quiz_id, qa.percentage DESC, qa.time_taken ASC
        LIMIT ?
        "#,
    )
    .bind(leaderboard_limit(&params))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch leaderboard: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(entries))
}

/// Top passed attempts for one quiz.
/// Ties on percentage are broken by the faster time.
pub async fn quiz_leaderboard(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<LeaderboardParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(quiz_id) = path?;
    let Query(params) = query?;
    let entries = sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT qa.quiz_id, qa.participant_name, q.quiz_name, qa.score, qa.percentage,
               qa.time_taken, qa.completed_at,
               RANK() OVER (ORDER BY qa.percentage DESC, qa.time_taken ASC) AS rank
        FROM quiz_attempts qa
        JOIN quizzes q ON qa.quiz_id = q.id
        WHERE qa.quiz_id = ? AND qa.passed = 1
        ORDER BY qa.percentage DESC, qa.time_taken ASC
        LIMIT ?
        "#,
    )
    .bind(quiz_id)
    .bind(leaderboard_limit(&params))
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch leaderboard for quiz {}: {:?}", quiz_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(entries))
}

const STATS_COLUMNS: &str = r#"
    SELECT
        q.id,
        q.quiz_name,
        COUNT(qa.id) AS total_attempts,
        AVG(qa.percentage) AS avg_score,
        MAX(qa.percentage) AS highest_score,
        MIN(qa.percentage) AS lowest_score,
        COUNT(CASE WHEN qa.passed = 1 THEN 1 END) AS passed_count,
        AVG(qa.time_taken) AS avg_time_taken
    FROM quizzes q
    LEFT JOIN quiz_attempts qa ON q.id = qa.quiz_id
"#;

/// Attempt statistics for every active quiz, busiest first.
pub async fn all_quiz_stats(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let sql = format!(
        "{} WHERE q.is_active = 1 GROUP BY q.id, q.quiz_name ORDER BY total_attempts DESC",
        STATS_COLUMNS
    );
    let stats = sqlx::query_as::<_, QuizStats>(&sql)
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch quiz statistics: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(stats))
}

/// Attempt statistics for one quiz. Unknown quizzes yield an empty object.
pub async fn quiz_stats(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(quiz_id) = path?;
    let sql = format!("{} WHERE q.id = ? GROUP BY q.id, q.quiz_name", STATS_COLUMNS);
    let stats = sqlx::query_as::<_, QuizStats>(&sql)
        .bind(quiz_id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch statistics for quiz {}: {:?}", quiz_id, e);
            AppError::InternalServerError(e.to_string())
        })?;

    let body = match stats {
        Some(stats) => serde_json::to_value(stats)?,
        None => serde_json::json!({}),
    };

    Ok(Json(body))
}

/// Lists categories by name.
pub async fn list_categories(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(categories))
}
