// src/stats/session.rs

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{attempt::AttemptRecord, daily_metric::DailyMetric};
use crate::stats::score::{ScoreInput, compute_leaderboard_score, non_negative, round_to};

/// Derived view over a set of attempts. Never stored authoritatively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_questions: u64,
    pub correct_answers: u64,
    /// Percentage rounded to one decimal.
    pub accuracy: f64,
    pub total_time_ms: u64,
    /// Mean milliseconds per question, rounded to the nearest millisecond.
    pub avg_speed_ms: u64,
    /// Leaderboard score rounded to two decimals.
    pub score: f64,
}

/// Totals an attempt sequence into score inputs.
pub fn totals_from_attempts(attempts: &[AttemptRecord]) -> ScoreInput {
    let sessions: HashSet<&str> = attempts.iter().map(|a| a.session_id.as_str()).collect();

    ScoreInput {
        total_questions: attempts.len() as u64,
        correct_answers: attempts.iter().filter(|a| a.is_correct).count() as u64,
        total_time_ms: attempts
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(non_negative(a.time_spent_ms))),
        session_count: sessions.len() as u64,
    }
}

/// Totals a run of daily rollups into score inputs.
pub fn totals_from_daily(metrics: &[DailyMetric]) -> ScoreInput {
    metrics.iter().fold(ScoreInput::default(), |mut acc, m| {
        let questions = non_negative(m.total_questions);
        acc.total_questions = acc.total_questions.saturating_add(questions);
        acc.correct_answers = acc
            .correct_answers
            .saturating_add(non_negative(m.correct_answers).min(questions));
        acc.total_time_ms = acc.total_time_ms.saturating_add(non_negative(m.total_time_ms));
        acc.session_count = acc.session_count.saturating_add(non_negative(m.session_count));
        acc
    })
}

/// Rounds and scores a set of totals.
///
/// Both the session path and the leaderboard path go through here, so the
/// two never disagree on accuracy, speed or score for the same totals.
pub fn summarize(totals: &ScoreInput) -> SessionSummary {
    let correct = totals.correct_answers.min(totals.total_questions);

    SessionSummary {
        total_questions: totals.total_questions,
        correct_answers: correct,
        accuracy: round_to(totals.accuracy_ratio() * 100.0, 1),
        total_time_ms: totals.total_time_ms,
        avg_speed_ms: totals.avg_time_ms().round() as u64,
        score: round_to(compute_leaderboard_score(totals), 2),
    }
}

/// Summarizes one session's attempts (in submission order; may be empty).
pub fn compute_session_summary(attempts: &[AttemptRecord]) -> SessionSummary {
    summarize(&totals_from_attempts(attempts))
}
