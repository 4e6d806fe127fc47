// src/models/leaderboard.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A per-(user, topic) progress row joined with the user's display name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub user_id: String,
    pub display_name: String,
    pub topic_id: String,
    #[serde(default)]
    pub questions_attempted: i64,
    #[serde(default)]
    pub questions_correct: i64,
    #[serde(default)]
    pub avg_time_ms: i64,
}

/// Ranked leaderboard line. Rank is assigned by sort order, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub display_name: String,
    pub score: f64,
    pub accuracy: f64,
    pub avg_speed_ms: u64,
    pub questions_answered: u64,
    pub is_current_user: bool,
}

/// Response for `GET /api/leaderboard`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    /// The caller's own entry, present even when it falls outside `entries`.
    pub current_user: Option<LeaderboardEntry>,
}

/// Query parameters for `GET /api/leaderboard`.
#[derive(Debug, Deserialize, Validate)]
pub struct LeaderboardParams {
    #[validate(length(min = 1, max = 100))]
    pub topic: Option<String>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<usize>,
}
