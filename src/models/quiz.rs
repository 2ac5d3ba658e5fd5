// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::{nullable, question::QuizQuestion};

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub quiz_name: String,
    pub description: Option<String>,
    pub category: Option<String>,

    /// Time limit in minutes.
    pub time_limit: Option<i64>,

    /// Minimum percentage needed to pass. `None` falls back to the default.
    pub passing_score: Option<f64>,

    pub allow_retakes: bool,
    pub show_correct_answers: bool,
    pub randomize_questions: bool,

    /// Soft-delete flag.
    pub is_active: bool,

    pub created_date: Option<chrono::NaiveDateTime>,
    pub updated_date: Option<chrono::NaiveDateTime>,
}

/// Quiz row with the number of linked questions, for listings.
#[derive(Debug, Serialize, FromRow)]
pub struct QuizSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub quiz: Quiz,
    pub question_count: i64,
}

/// Quiz with its active questions in display order.
#[derive(Debug, Serialize)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuizQuestion>,
}

/// Query parameters for listing quizzes.
#[derive(Debug, Deserialize)]
pub struct ListQuizzesParams {
    /// `1` (default) lists active rows, `0` lists soft-deleted ones.
    pub active: Option<i64>,
}

/// DTO for creating a new quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200, message = "Quiz name is required"))]
    pub quiz_name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(range(min = 1))]
    pub time_limit: Option<i64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub passing_score: Option<f64>,
    pub allow_retakes: Option<bool>,
    pub show_correct_answers: Option<bool>,
    pub randomize_questions: Option<bool>,
}

/// DTO for updating a quiz. Absent fields are left unchanged; `null` clears
/// a nullable column (a cleared `passing_score` grades against the default).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub quiz_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2000))]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 100))]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 1))]
    pub time_limit: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub passing_score: Option<Option<f64>>,
    pub allow_retakes: Option<bool>,
    pub show_correct_answers: Option<bool>,
    pub randomize_questions: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdateQuizRequest {
    pub fn is_empty(&self) -> bool {
        self.quiz_name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.time_limit.is_none()
            && self.passing_score.is_none()
            && self.allow_retakes.is_none()
            && self.show_correct_answers.is_none()
            && self.randomize_questions.is_none()
            && self.is_active.is_none()
    }
}

/// DTO for linking a question into a quiz.
/// Without an explicit order the question is appended at the end.
#[derive(Debug, Deserialize)]
pub struct AddQuizQuestionRequest {
    pub question_id: Option<i64>,
    pub question_order: Option<i64>,
}
