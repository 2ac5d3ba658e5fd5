// src/grading/grader.rs

use std::sync::Arc;

use crate::{
    config::DEFAULT_PASSING_SCORE,
    error::AppError,
    grading::matcher::is_correct,
    models::attempt::{DetailedAnswer, NewAttempt, SubmissionResult, SubmitAttemptRequest},
    store::QuizStore,
};

/// Grades quiz submissions and records them as attempts.
pub struct Grader<S> {
    store: Arc<S>,
}

impl<S: QuizStore> Grader<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Grades a submission against the quiz's active questions.
    ///
    /// * Answers are paired with questions by position; a missing answer is wrong.
    /// * The attempt insert is the only write that can fail the submission.
    /// * Usage counters are bumped in the background after the insert.
    pub async fn submit(
        &self,
        quiz_id: i64,
        req: SubmitAttemptRequest,
    ) -> Result<SubmissionResult, AppError> {
        let submission = req.into_submission()?;

        let questions = self.store.load_active_questions_for_quiz(quiz_id).await?;
        if questions.is_empty() {
            return Err(AppError::NotFound(
                "Quiz not found or has no questions".to_string(),
            ));
        }

        let mut score: i64 = 0;
        let detailed_answers: Vec<DetailedAnswer> = questions
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let question = &entry.question;
                let user_answer = submission.answers.get(index).cloned().flatten();
                let correct = is_correct(
                    &question.question_type,
                    &question.correct_answers,
                    user_answer.as_ref(),
                );
                if correct {
                    score += 1;
                }
                DetailedAnswer {
                    question_id: question.id,
                    user_answer,
                    correct_answers: question.correct_answers.0.clone(),
                    correct,
                }
            })
            .collect();

        let total_questions = questions.len() as i64;
        let percentage = score_percentage(score, total_questions);

        let threshold = self
            .store
            .load_quiz(quiz_id)
            .await?
            .and_then(|quiz| quiz.passing_score)
            .unwrap_or(DEFAULT_PASSING_SCORE);
        let passed = percentage >= threshold;

        let attempt = NewAttempt {
            quiz_id,
            participant_name: submission.participant_name,
            participant_email: submission.participant_email,
            score,
            total_questions,
            percentage,
            time_taken: submission.time_taken,
            passed,
            answers: detailed_answers,
            started_at: submission.started_at,
        };
        let attempt_id = self.store.insert_attempt(&attempt).await?;

        tracing::info!(
            quiz_id,
            attempt_id,
            score,
            total_questions,
            passed,
            "Graded quiz submission"
        );

        self.record_usage(questions.iter().map(|entry| entry.question.id).collect());

        Ok(SubmissionResult {
            attempt_id,
            score,
            total_questions,
            percentage: round_to_hundredths(percentage),
            passed,
            detailed_answers: attempt.answers,
        })
    }

    /// Bumps usage counters on a detached task. Failures are only logged.
    fn record_usage(&self, question_ids: Vec<i64>) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            for question_id in question_ids {
                if let Err(e) = store.increment_question_usage(question_id).await {
                    tracing::warn!(
                        "Failed to update usage count for question {}: {}",
                        question_id,
                        e
                    );
                }
            }
        });
    }
}

/// Share of correct answers as a percentage. `total` is never zero here.
fn score_percentage(score: i64, total: i64) -> f64 {
    100.0 * score as f64 / total as f64
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
