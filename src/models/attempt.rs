// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One answered question, as stored in the `question_attempts` table.
/// Rows are immutable once written.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub question_id: String,

    pub is_correct: bool,

    /// Milliseconds spent on the question. Missing or negative values count as zero.
    #[serde(default)]
    pub time_spent_ms: i64,

    pub answered_at: DateTime<Utc>,

    /// The drill/practice session this answer belongs to.
    pub session_id: String,

    /// Curriculum unit the question is tagged with (e.g. "calculus").
    pub topic_id: String,
}
