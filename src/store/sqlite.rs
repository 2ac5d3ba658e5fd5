// src/store/sqlite.rs

use async_trait::async_trait;
use sqlx::{SqlitePool, types::Json};

use crate::{
    error::AppError,
    models::{attempt::NewAttempt, question::QuizQuestion, quiz::Quiz},
    store::QuizStore,
};

/// `QuizStore` backed by the application's SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizStore for SqliteStore {
    async fn load_active_questions_for_quiz(
        &self,
        quiz_id: i64,
    ) -> Result<Vec<QuizQuestion>, AppError> {
        sqlx::query_as::<_, QuizQuestion>(
            r#"
            SELECT q.*, qq.question_order
            FROM questions q
            JOIN quiz_questions qq ON q.id = qq.question_id
            WHERE qq.quiz_id = ? AND q.is_active = 1
            ORDER BY qq.question_order
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load questions for quiz {}: {:?}", quiz_id, e);
            AppError::InternalServerError(e.to_string())
        })
    }

    async fn load_quiz(&self, quiz_id: i64) -> Result<Option<Quiz>, AppError> {
        sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes WHERE id = ?")
            .bind(quiz_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load quiz {}: {:?}", quiz_id, e);
                AppError::InternalServerError(e.to_string())
            })
    }

    async fn insert_attempt(&self, attempt: &NewAttempt) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO quiz_attempts
            (quiz_id, participant_name, participant_email, score, total_questions,
             percentage, time_taken, answers, passed, started_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(attempt.quiz_id)
        .bind(&attempt.participant_name)
        .bind(&attempt.participant_email)
        .bind(attempt.score)
        .bind(attempt.total_questions)
        .bind(attempt.percentage)
        .bind(attempt.time_taken)
        .bind(Json(&attempt.answers))
        .bind(attempt.passed)
        .bind(&attempt.started_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert attempt: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        Ok(result.last_insert_rowid())
    }

    async fn increment_question_usage(&self, question_id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE questions SET usage_count = usage_count + 1 WHERE id = ?")
            .bind(question_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
