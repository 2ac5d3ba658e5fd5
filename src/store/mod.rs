// src/store/mod.rs

pub mod sqlite;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{attempt::NewAttempt, question::QuizQuestion, quiz::Quiz},
};

pub use sqlite::SqliteStore;

/// Persistence operations the grader depends on.
///
/// Implementations acquire whatever connection they need per call; the grader
/// holds no database state of its own.
#[async_trait]
pub trait QuizStore: Send + Sync + 'static {
    /// Active questions linked to the quiz, ordered by `question_order`.
    async fn load_active_questions_for_quiz(
        &self,
        quiz_id: i64,
    ) -> Result<Vec<QuizQuestion>, AppError>;

    async fn load_quiz(&self, quiz_id: i64) -> Result<Option<Quiz>, AppError>;

    /// Inserts the attempt and returns its generated id.
    async fn insert_attempt(&self, attempt: &NewAttempt) -> Result<i64, AppError>;

    async fn increment_question_usage(&self, question_id: i64) -> Result<(), AppError>;
}
