// src/stats/insights.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::progress::{TopicProgress, level_for};
use crate::stats::score::{non_negative, round_to};

/// Topics with fewer attempts are not ranked as strongest or weakest.
pub const MIN_RANKED_ATTEMPTS: u64 = 5;

/// Topics untouched for longer than this are flagged for revision.
pub const STALE_AFTER_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicBreakdown {
    pub topic_id: String,
    pub attempted: u64,
    pub correct: u64,
    pub accuracy: f64,
    pub avg_time_ms: u64,
    pub level: i32,
    pub level_title: String,
    /// `None` when the topic has never been practised.
    pub days_since_practice: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicInsights {
    pub topics: Vec<TopicBreakdown>,
    pub strongest: Option<TopicBreakdown>,
    pub weakest: Option<TopicBreakdown>,
    pub needs_practice: Vec<String>,
}

fn breakdown(progress: &TopicProgress, today: NaiveDate) -> TopicBreakdown {
    let attempted = non_negative(progress.questions_attempted);
    let correct = non_negative(progress.questions_correct).min(attempted);
    let accuracy = if attempted == 0 {
        0.0
    } else {
        round_to(correct as f64 / attempted as f64 * 100.0, 1)
    };
    let level = level_for(correct as i64);

    TopicBreakdown {
        topic_id: progress.topic_id.clone(),
        attempted,
        correct,
        accuracy,
        avg_time_ms: non_negative(progress.avg_time_ms),
        level: level.level,
        level_title: level.title.to_string(),
        days_since_practice: progress
            .last_practiced_at
            .map(|at| (today - at.date_naive()).num_days().max(0)),
    }
}

/// Per-topic breakdown plus strongest/weakest topics and revision hints.
pub fn compute_topic_insights(progress: &[TopicProgress], today: NaiveDate) -> TopicInsights {
    let topics: Vec<TopicBreakdown> = progress.iter().map(|p| breakdown(p, today)).collect();

    let mut strongest: Option<&TopicBreakdown> = None;
    let mut weakest: Option<&TopicBreakdown> = None;
    for topic in topics.iter().filter(|t| t.attempted >= MIN_RANKED_ATTEMPTS) {
        // Strict comparisons keep the first topic on ties.
        if strongest.is_none_or(|s| topic.accuracy > s.accuracy) {
            strongest = Some(topic);
        }
        if weakest.is_none_or(|w| topic.accuracy < w.accuracy) {
            weakest = Some(topic);
        }
    }

    let needs_practice = topics
        .iter()
        .filter(|t| t.days_since_practice.is_some_and(|d| d > STALE_AFTER_DAYS))
        .map(|t| t.topic_id.clone())
        .collect();

    TopicInsights {
        strongest: strongest.cloned(),
        weakest: weakest.cloned(),
        needs_practice,
        topics,
    }
}
