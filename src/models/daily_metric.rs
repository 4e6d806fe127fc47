// src/models/daily_metric.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user rollup of one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date: NaiveDate,
    #[serde(default)]
    pub total_questions: i64,
    #[serde(default)]
    pub correct_answers: i64,
    #[serde(default)]
    pub total_time_ms: i64,
    #[serde(default)]
    pub session_count: i64,
}

impl DailyMetric {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_questions: 0,
            correct_answers: 0,
            total_time_ms: 0,
            session_count: 0,
        }
    }
}
