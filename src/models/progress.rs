// src/models/progress.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::attempt::AttemptRecord;

/// Rolling per-(user, topic) counters from the `topic_progress` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct TopicProgress {
    pub user_id: String,
    pub topic_id: String,
    #[serde(default)]
    pub questions_attempted: i64,
    #[serde(default)]
    pub questions_correct: i64,
    /// Mean time per question in milliseconds.
    #[serde(default)]
    pub avg_time_ms: i64,
    #[serde(default = "first_level")]
    pub level: i32,
    pub last_practiced_at: Option<DateTime<Utc>>,
}

fn first_level() -> i32 {
    LEVELS[0].level
}

impl TopicProgress {
    pub fn new(user_id: impl Into<String>, topic_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            topic_id: topic_id.into(),
            questions_attempted: 0,
            questions_correct: 0,
            avg_time_ms: 0,
            level: first_level(),
            last_practiced_at: None,
        }
    }

    /// Folds one new attempt into the counters.
    ///
    /// The average becomes the running mean rounded to the nearest
    /// millisecond, and the last-practiced time never moves backwards.
    pub fn record_attempt(&mut self, attempt: &AttemptRecord) {
        let previous = self.questions_attempted.max(0);
        let attempted = previous.saturating_add(1);
        let spent = attempt.time_spent_ms.max(0);

        let running_total = self.avg_time_ms.max(0) as f64 * previous as f64 + spent as f64;
        self.avg_time_ms = (running_total / attempted as f64).round() as i64;
        self.questions_attempted = attempted;
        if attempt.is_correct {
            self.questions_correct = self.questions_correct.max(0).saturating_add(1);
        }

        self.last_practiced_at = match self.last_practiced_at {
            Some(last) if last >= attempt.answered_at => Some(last),
            _ => Some(attempt.answered_at),
        };
        self.level = level_for(self.questions_correct).level;
    }
}

/// Level definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    pub level: i32,
    pub correct_required: i64,
    pub title: &'static str,
}

/// Topic levels, sorted by `correct_required`.
pub static LEVELS: &[Level] = &[
    Level { level: 1, correct_required: 0, title: "Beginner" },
    Level { level: 2, correct_required: 10, title: "Learner" },
    Level { level: 3, correct_required: 30, title: "Practitioner" },
    Level { level: 4, correct_required: 75, title: "Skilled" },
    Level { level: 5, correct_required: 150, title: "Advanced" },
    Level { level: 6, correct_required: 300, title: "Expert" },
    Level { level: 7, correct_required: 600, title: "Master" },
];

/// Highest level whose threshold `correct_answers` reaches.
pub fn level_for(correct_answers: i64) -> &'static Level {
    LEVELS
        .iter()
        .rev()
        .find(|l| correct_answers >= l.correct_required)
        .unwrap_or(&LEVELS[0])
}
