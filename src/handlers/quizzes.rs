// src/handlers/quizzes.rs

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::{
    config::DEFAULT_PASSING_SCORE,
    error::AppError,
    models::quiz::{
        AddQuizQuestionRequest, CreateQuizRequest, ListQuizzesParams, QuizDetail, QuizSummary,
        UpdateQuizRequest,
    },
    store::{QuizStore, SqliteStore},
};

/// Lists quizzes with their question counts, newest first.
pub async fn list_quizzes(
    State(pool): State<SqlitePool>,
    query: Result<Query<ListQuizzesParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query?;
    let quizzes = sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT q.*, COUNT(qq.question_id) AS question_count
        FROM quizzes q
        LEFT JOIN quiz_questions qq ON q.id = qq.quiz_id
        WHERE q.is_active = ?
        GROUP BY q.id
        ORDER BY q.created_date DESC, q.id DESC
        "#,
    )
    .bind(params.active.unwrap_or(1) != 0)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list quizzes: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(quizzes))
}

/// Retrieves a quiz together with its active questions in display order.
pub async fn get_quiz(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let store = SqliteStore::new(pool);

    let quiz = store
        .load_quiz(id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;
    let questions = store.load_active_questions_for_quiz(id).await?;

    Ok(Json(QuizDetail { quiz, questions }))
}

/// Creates a new quiz.
pub async fn create_quiz(
    State(pool): State<SqlitePool>,
    payload: Result<Json<CreateQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = sqlx::query(
        r#"
        INSERT INTO quizzes
        (quiz_name, description, category, time_limit, passing_score,
         allow_retakes, show_correct_answers, randomize_questions)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.quiz_name)
    .bind(payload.description)
    .bind(payload.category)
    .bind(payload.time_limit)
    .bind(payload.passing_score.unwrap_or(DEFAULT_PASSING_SCORE))
    .bind(payload.allow_retakes.unwrap_or(true))
    .bind(payload.show_correct_answers.unwrap_or(true))
    .bind(payload.randomize_questions.unwrap_or(false))
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .last_insert_rowid();

    tracing::info!("Created quiz {}", id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"id": id, "message": "Quiz created successfully"})),
    ))
}

/// Updates a quiz by ID. Only the supplied fields change.
pub async fn update_quiz(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateQuizRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let Json(payload) = payload?;
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if payload.is_empty() {
        sqlx::query("SELECT id FROM quizzes WHERE id = ?")
            .bind(id)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::NotFound("Quiz not found".to_string()))?;
        return Ok(Json(serde_json::json!({"message": "Quiz updated successfully"})));
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE quizzes SET ");
    let mut separated = builder.separated(", ");

    if let Some(quiz_name) = payload.quiz_name {
        separated.push("quiz_name = ");
        separated.push_bind_unseparated(quiz_name);
    }

    if let Some(description) = payload.description {
        separated.push("description = ");
        separated.push_bind_unseparated(description);
    }

    if let Some(category) = payload.category {
        separated.push("category = ");
        separated.push_bind_unseparated(category);
    }

    if let Some(time_limit) = payload.time_limit {
        separated.push("time_limit = ");
        separated.push_bind_unseparated(time_limit);
    }

    if let Some(passing_score) = payload.passing_score {
        separated.push("passing_score = ");
        separated.push_bind_unseparated(passing_score);
    }

    if let Some(allow_retakes) = payload.allow_retakes {
        separated.push("allow_retakes = ");
        separated.push_bind_unseparated(allow_retakes);
    }

    if let Some(show_correct_answers) = payload.show_correct_answers {
        separated.push("show_correct_answers = ");
        separated.push_bind_unseparated(show_correct_answers);
    }

    if let Some(randomize_questions) = payload.randomize_questions {
        separated.push("randomize_questions = ");
        separated.push_bind_unseparated(randomize_questions);
    }

    if let Some(is_active) = payload.is_active {
        separated.push("is_active = ");
        separated.push_bind_unseparated(is_active);
    }

    separated.push("updated_date = CURRENT_TIMESTAMP");

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&pool).await.map_err(|e| {
        tracing::error!("Failed to update quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok(Json(serde_json::json!({"message": "Quiz updated successfully"})))
}

/// Soft-deletes a quiz.
pub async fn delete_quiz(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let result = sqlx::query(
        "UPDATE quizzes SET is_active = 0, updated_date = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to delete quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok(Json(serde_json::json!({"message": "Quiz deleted successfully"})))
}

/// Links a question into a quiz.
///
/// Without `question_order` the question is appended after the current last one.
pub async fn add_question_to_quiz(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AddQuizQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(quiz_id) = path?;
    let Json(payload) = payload?;
    let question_id = payload
        .question_id
        .ok_or(AppError::BadRequest("Question ID is required".to_string()))?;

    sqlx::query("SELECT id FROM quizzes WHERE id = ?")
        .bind(quiz_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    sqlx::query("SELECT id FROM questions WHERE id = ?")
        .bind(question_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    let question_order = match payload.question_order {
        Some(order) => order,
        None => sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(question_order), 0) + 1 FROM quiz_questions WHERE quiz_id = ?",
        )
        .bind(quiz_id)
        .fetch_one(&pool)
        .await?,
    };

    sqlx::query(
        "INSERT INTO quiz_questions (quiz_id, question_id, question_order) VALUES (?, ?, ?)",
    )
    .bind(quiz_id)
    .bind(question_id)
    .bind(question_order)
    .execute(&pool)
    .await
    .map_err(|e| {
        let message = e.to_string();
        if message.contains("UNIQUE constraint failed") {
            if message.contains("question_order") {
                AppError::Conflict(format!("Position {} is already taken in this quiz", question_order))
            } else {
                AppError::Conflict("Question already exists in this quiz".to_string())
            }
        } else {
            tracing::error!("Failed to add question to quiz: {:?}", e);
            AppError::InternalServerError(message)
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Question added to quiz successfully",
            "question_order": question_order
        })),
    ))
}

/// Unlinks a question from a quiz. The question itself is untouched.
pub async fn remove_question_from_quiz(
    State(pool): State<SqlitePool>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path((quiz_id, question_id)) = path?;
    let result = sqlx::query("DELETE FROM quiz_questions WHERE quiz_id = ? AND question_id = ?")
        .bind(quiz_id)
        .bind(question_id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to remove question from quiz: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found in quiz".to_string()));
    }

    Ok(Json(serde_json::json!({"message": "Question removed from quiz successfully"})))
}
