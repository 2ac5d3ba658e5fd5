// src/handlers/questions.rs

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool, types::Json as SqlJson};
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{
        CreateQuestionRequest, ListQuestionsParams, Question, QuestionType, UpdateQuestionRequest,
    },
};

/// Lists questions, newest first.
///
/// Filters: `category`, `difficulty`, `type`, and `active` (defaults to 1).
pub async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<ListQuestionsParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query?;
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT * FROM questions WHERE is_active = ");
    builder.push_bind(params.active.unwrap_or(1) != 0);

    if let Some(category) = params.category {
        builder.push(" AND category = ");
        builder.push_bind(category);
    }

    if let Some(difficulty) = params.difficulty {
        builder.push(" AND difficulty_level = ");
        builder.push_bind(difficulty);
    }

    if let Some(question_type) = params.question_type {
        builder.push(" AND question_type = ");
        builder.push_bind(String::from(QuestionType::from(question_type)));
    }

    builder.push(" ORDER BY created_date DESC, id DESC");

    let questions: Vec<Question> = builder
        .build_query_as()
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list questions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(questions))
}

/// Retrieves a single question by ID, including inactive ones.
pub async fn get_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let question = sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = ?")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

/// Creates a new question.
pub async fn create_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let question_type = String::from(QuestionType::from(payload.question_type));

    let id = sqlx::query(
        r#"
        INSERT INTO questions
        (question_text, question_type, options, correct_answers, feedback, difficulty_level, category)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.question_text)
    .bind(question_type)
    .bind(SqlJson(payload.options))
    .bind(SqlJson(payload.correct_answers))
    .bind(payload.feedback)
    .bind(payload.difficulty_level.unwrap_or(1))
    .bind(payload.category)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .last_insert_rowid();

    tracing::info!("Created question {}", id);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"id": id, "message": "Question created successfully"})),
    ))
}

/// Updates a question by ID. Only the supplied fields change.
pub async fn update_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let Json(payload) = payload?;
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if payload.is_empty() {
        sqlx::query("SELECT id FROM questions WHERE id = ?")
            .bind(id)
            .fetch_optional(&pool)
            .await?
            .ok_or(AppError::NotFound("Question not found".to_string()))?;
        return Ok(Json(serde_json::json!({"message": "Question updated successfully"})));
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE questions SET ");
    let mut separated = builder.separated(", ");

    if let Some(question_text) = payload.question_text {
        separated.push("question_text = ");
        separated.push_bind_unseparated(question_text);
    }

    if let Some(question_type) = payload.question_type {
        separated.push("question_type = ");
        separated.push_bind_unseparated(String::from(QuestionType::from(question_type)));
    }

    if let Some(options) = payload.options {
        separated.push("options = ");
        separated.push_bind_unseparated(SqlJson(options));
    }

    if let Some(correct_answers) = payload.correct_answers {
        separated.push("correct_answers = ");
        separated.push_bind_unseparated(SqlJson(correct_answers));
    }

    if let Some(feedback) = payload.feedback {
        separated.push("feedback = ");
        separated.push_bind_unseparated(feedback);
    }

    if let Some(difficulty_level) = payload.difficulty_level {
        separated.push("difficulty_level = ");
        separated.push_bind_unseparated(difficulty_level);
    }

    if let Some(category) = payload.category {
        separated.push("category = ");
        separated.push_bind_unseparated(category);
    }

    if let Some(is_active) = payload.is_active {
        separated.push("is_active = ");
        separated.push_bind_unseparated(is_active);
    }

    separated.push("updated_date = CURRENT_TIMESTAMP");

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&pool).await.map_err(|e| {
        tracing::error!("Failed to update question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(Json(serde_json::json!({"message": "Question updated successfully"})))
}

/// Soft-deletes a question. Historical attempts keep referencing it.
pub async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;
    let result = sqlx::query(
        "UPDATE questions SET is_active = 0, updated_date = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to delete question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(Json(serde_json::json!({"message": "Question deleted successfully"})))
}
