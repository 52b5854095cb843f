// src/models/score_record.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// One (topic, score) result appended to the score log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreRecord {
    pub topic: String,
    pub score: i64,
}

/// Represents a row of the 'results' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
pub struct ScoreEntry {
    pub id: i64,
    pub topic: String,
    pub score: i64,
    pub recorded_at: NaiveDateTime,
}

impl From<ScoreEntry> for ScoreRecord {
    fn from(entry: ScoreEntry) -> Self {
        Self {
            topic: entry.topic,
            score: entry.score,
        }
    }
}

/// Aggregated results for one topic.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicStats {
    pub topic: String,
    pub attempts: i64,
    pub best_score: Option<i64>,
    pub average_score: Option<f64>,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub topic: String,

    /// Selected option per question, in question order.
    #[validate(length(min = 1))]
    pub answers: Vec<String>,
}

/// DTO returned after a quiz is scored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuizResultResponse {
    pub topic: String,
    pub score: usize,
    pub total_questions: usize,
    /// True only for a full score.
    pub passed: bool,
    pub message: String,
}
