// src/models/stats.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One ranked row of the leaderboard.
/// Only passed attempts are ranked.
#[derive(Debug, Serialize, FromRow)]
pub struct LeaderboardEntry {
    pub quiz_id: i64,
    pub participant_name: String,
    pub quiz_name: String,
    pub score: i64,
    pub percentage: f64,
    pub time_taken: Option<i64>,
    pub completed_at: Option<chrono::NaiveDateTime>,
    pub rank: i64,
}

/// Query parameters for the leaderboard.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<i64>,
}

/// Aggregate attempt statistics for one quiz.
/// Score columns are percentages; they are `None` until the quiz has attempts.
#[derive(Debug, Serialize, FromRow)]
pub struct QuizStats {
    pub id: i64,
    pub quiz_name: String,
    pub total_attempts: i64,
    pub avg_score: Option<f64>,
    pub highest_score: Option<f64>,
    pub lowest_score: Option<f64>,
    pub passed_count: i64,
    pub avg_time_taken: Option<f64>,
}
