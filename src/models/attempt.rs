// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::Validate;

use crate::error::AppError;

/// One answer exactly as the participant sent it.
///
/// Anything that is neither a string nor a list of strings is preserved in
/// `Other` so the audit trail records the raw value; it never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserAnswer {
    Text(String),
    Choices(Vec<String>),
    Other(serde_json::Value),
}

/// Grading decision for a single question, frozen at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnswer {
    pub question_id: i64,
    pub user_answer: Option<UserAnswer>,
    pub correct_answers: Vec<String>,
    pub correct: bool,
}

/// Represents the 'quiz_attempts' table in the database.
/// Rows are written once and never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    pub participant_name: String,
    pub participant_email: Option<String>,
    pub score: i64,
    pub total_questions: i64,
    pub percentage: f64,
    /// Seconds spent on the quiz, as reported by the client.
    pub time_taken: Option<i64>,
    pub passed: bool,
    pub answers: Json<Vec<DetailedAnswer>>,
    pub started_at: Option<String>,
    pub completed_at: Option<chrono::NaiveDateTime>,
}

/// Everything needed to insert an attempt row.
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub quiz_id: i64,
    pub participant_name: String,
    pub participant_email: Option<String>,
    pub score: i64,
    pub total_questions: i64,
    pub percentage: f64,
    pub time_taken: Option<i64>,
    pub passed: bool,
    pub answers: Vec<DetailedAnswer>,
    pub started_at: Option<String>,
}

/// Raw body of a quiz submission.
///
/// Required fields are optional here so a missing field surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    #[validate(
        required(message = "participant_name is required"),
        length(min = 1, max = 200, message = "participant_name is required")
    )]
    pub participant_name: Option<String>,
    #[validate(length(max = 320))]
    pub participant_email: Option<String>,
    /// Answers in question order. Must be a JSON array.
    pub answers: Option<serde_json::Value>,
    /// Seconds spent. Fractional values are rounded to whole seconds.
    pub time_taken: Option<f64>,
    /// Client start time, usually an ISO string but sometimes epoch millis.
    pub started_at: Option<serde_json::Value>,
}

/// A validated submission, ready for grading.
#[derive(Debug, Clone)]
pub struct Submission {
    pub participant_name: String,
    pub participant_email: Option<String>,
    pub answers: Vec<Option<UserAnswer>>,
    pub time_taken: Option<i64>,
    pub started_at: Option<String>,
}

impl SubmitAttemptRequest {
    /// Checks required fields and decodes the answer list.
    pub fn into_submission(self) -> Result<Submission, AppError> {
        if let Err(validation_errors) = self.validate() {
            return Err(AppError::BadRequest(validation_errors.to_string()));
        }

        let participant_name = match self.participant_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(AppError::BadRequest("Missing required fields".to_string())),
        };

        let raw_answers = match self.answers {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Err(AppError::BadRequest("Missing required fields".to_string())),
        };

        let answers = raw_answers
            .into_iter()
            .map(serde_json::from_value::<Option<UserAnswer>>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Submission {
            participant_name,
            participant_email: self.participant_email,
            answers,
            time_taken: self
                .time_taken
                .filter(|seconds| seconds.is_finite())
                .map(|seconds| seconds.round() as i64),
            started_at: self.started_at.and_then(started_at_text),
        })
    }
}

/// Stores strings as-is and any other scalar in its JSON form.
fn started_at_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Response body for a graded submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    pub attempt_id: i64,
    pub score: i64,
    pub total_questions: i64,
    /// Rounded to two decimal places.
    pub percentage: f64,
    pub passed: bool,
    pub detailed_answers: Vec<DetailedAnswer>,
}

/// Pagination for attempt listings.
#[derive(Debug, Deserialize)]
pub struct ListAttemptsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> SubmitAttemptRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn answers_keep_their_shape() {
        let submission = request(json!({
            "participant_name": "Alex",
            "answers": ["True", ["Mars", "Jupiter"], null, 42]
        }))
        .into_submission()
        .unwrap();

        assert_eq!(
            submission.answers,
            vec![
                Some(UserAnswer::Text("True".to_string())),
                Some(UserAnswer::Choices(vec![
                    "Mars".to_string(),
                    "Jupiter".to_string()
                ])),
                None,
                Some(UserAnswer::Other(json!(42))),
            ]
        );
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = request(json!({ "answers": [] })).into_submission().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = request(json!({ "participant_name": "   ", "answers": [] }))
            .into_submission()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn non_array_answers_are_rejected() {
        let err = request(json!({ "participant_name": "Alex", "answers": "True" }))
            .into_submission()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = request(json!({ "participant_name": "Alex" }))
            .into_submission()
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn fractional_time_taken_is_rounded() {
        let submission = request(json!({
            "participant_name": "Alex",
            "answers": [],
            "time_taken": 95.5
        }))
        .into_submission()
        .unwrap();
        assert_eq!(submission.time_taken, Some(96));
    }

    #[test]
    fn numeric_started_at_is_kept() {
        let submission = request(json!({
            "participant_name": "Alex",
            "answers": [],
            "started_at": 1700000000000i64
        }))
        .into_submission()
        .unwrap();
        assert_eq!(submission.started_at.as_deref(), Some("1700000000000"));

        let submission = request(json!({
            "participant_name": "Alex",
            "answers": [],
            "started_at": "2025-01-01T10:00:00Z"
        }))
        .into_submission()
        .unwrap();
        assert_eq!(submission.started_at.as_deref(), Some("2025-01-01T10:00:00Z"));
    }

    #[test]
    fn absent_answer_serializes_as_null() {
        let detail = DetailedAnswer {
            question_id: 7,
            user_answer: None,
            correct_answers: vec!["Paris".to_string()],
            correct: false,
        };
        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "question_id": 7,
                "user_answer": null,
                "correct_answers": ["Paris"],
                "correct": false
            })
        );
    }
}
