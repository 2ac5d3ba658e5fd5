// src/models/question.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

use crate::models::nullable;

/// How a question's answer is compared against its correct-answer set.
///
/// Stored as free text in the database. Legacy names from older data are
/// accepted as aliases and normalized; anything unrecognized is kept verbatim
/// and graded like a single-answer question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    SingleChoice,
    Boolean,
    MultiSelect,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::SingleChoice => "single-choice",
            QuestionType::Boolean => "boolean",
            QuestionType::MultiSelect => "multi-select",
            QuestionType::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for QuestionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "single-choice" | "multiple-choice" => QuestionType::SingleChoice,
            "boolean" | "true-false" => QuestionType::Boolean,
            "multi-select" | "multiple-choice-multiple" => QuestionType::MultiSelect,
            _ => QuestionType::Other(raw),
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub question_text: String,

    #[sqlx(try_from = "String")]
    pub question_type: QuestionType,

    /// Choices shown to the participant, in display order.
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// Accepted answers. Every entry is expected to appear in `options`.
    pub correct_answers: Json<Vec<String>>,

    /// Explanation shown after grading.
    pub feedback: Option<String>,

    pub difficulty_level: i64,

    pub category: Option<String>,

    /// Soft-delete flag. Inactive questions are never graded.
    pub is_active: bool,

    /// Number of graded submissions that included this question.
    pub usage_count: i64,

    pub created_date: Option<chrono::NaiveDateTime>,
    pub updated_date: Option<chrono::NaiveDateTime>,
}

/// A question as it appears inside a quiz, with its position.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizQuestion {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub question: Question,
    pub question_order: i64,
}

/// Query parameters for listing questions.
#[derive(Debug, Deserialize)]
pub struct ListQuestionsParams {
    pub category: Option<String>,
    pub difficulty: Option<i64>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    /// `1` (default) lists active rows, `0` lists soft-deleted ones.
    pub active: Option<i64>,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: String,
    #[validate(length(min = 1, max = 40))]
    pub question_type: String,
    #[validate(custom(function = validate_choices))]
    pub options: Vec<String>,
    #[validate(custom(function = validate_choices))]
    pub correct_answers: Vec<String>,
    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
    #[validate(range(min = 1, max = 10))]
    pub difficulty_level: Option<i64>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
}

/// DTO for updating a question. Absent fields are left unchanged;
/// `null` clears `feedback` or `category`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question_text: Option<String>,
    #[validate(length(min = 1, max = 40))]
    pub question_type: Option<String>,
    #[validate(custom(function = validate_choices))]
    pub options: Option<Vec<String>>,
    #[validate(custom(function = validate_choices))]
    pub correct_answers: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2000))]
    pub feedback: Option<Option<String>>,
    #[validate(range(min = 1, max = 10))]
    pub difficulty_level: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 100))]
    pub category: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UpdateQuestionRequest {
    pub fn is_empty(&self) -> bool {
        self.question_text.is_none()
            && self.question_type.is_none()
            && self.options.is_none()
            && self.correct_answers.is_none()
            && self.feedback.is_none()
            && self.difficulty_level.is_none()
            && self.category.is_none()
            && self.is_active.is_none()
    }
}

fn validate_choices(choices: &[String]) -> Result<(), validator::ValidationError> {
    if choices.is_empty() {
        return Err(validator::ValidationError::new("choices_cannot_be_empty"));
    }
    for choice in choices {
        if choice.len() > 500 {
            return Err(validator::ValidationError::new("choice_too_long"));
        }
    }
    Ok(())
}
