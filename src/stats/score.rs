// src/stats/score.rs

use serde::Serialize;

/// Upper bound of the leaderboard score.
pub const MAX_SCORE: f64 = 1000.0;

/// Average time per question at which the speed factor drops to one half.
pub const REFERENCE_TIME_MS: f64 = 90_000.0;

/// Number of questions at which the volume factor reaches one half.
pub const VOLUME_HALF_SATURATION: f64 = 20.0;

const SPEED_WEIGHT: f64 = 0.3;
const VOLUME_WEIGHT: f64 = 0.5;

/// Aggregate counts a score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreInput {
    pub total_questions: u64,
    pub correct_answers: u64,
    pub total_time_ms: u64,
    /// Carried for display; it does not weight the score.
    pub session_count: u64,
}

impl ScoreInput {
    /// Fraction of correct answers in `[0, 1]`, 0 when nothing was attempted.
    pub fn accuracy_ratio(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.correct_answers.min(self.total_questions) as f64 / self.total_questions as f64
    }

    /// Mean milliseconds per question, 0 when nothing was attempted.
    pub fn avg_time_ms(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.total_time_ms as f64 / self.total_questions as f64
    }
}

/// Canonical leaderboard score in `[0, MAX_SCORE]`.
///
/// `MAX_SCORE * accuracy * (0.7 + 0.3 * speed) * (0.5 + 0.5 * volume)` where
/// `speed = T / (T + avg_time)` and `volume = n / (n + N)`. Both factors
/// saturate below 1, so volume alone can never push the score past what the
/// accuracy earns.
pub fn compute_leaderboard_score(stats: &ScoreInput) -> f64 {
    if stats.total_questions == 0 {
        return 0.0;
    }

    let accuracy = stats.accuracy_ratio();
    let speed = REFERENCE_TIME_MS / (REFERENCE_TIME_MS + stats.avg_time_ms());
    let volume =
        stats.total_questions as f64 / (stats.total_questions as f64 + VOLUME_HALF_SATURATION);

    let speed_factor = (1.0 - SPEED_WEIGHT) + SPEED_WEIGHT * speed;
    let volume_factor = (1.0 - VOLUME_WEIGHT) + VOLUME_WEIGHT * volume;

    (MAX_SCORE * accuracy * speed_factor * volume_factor).clamp(0.0, MAX_SCORE)
}

/// Rounds to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Converts a stored signed count into an unsigned one, treating negatives as zero.
pub fn non_negative(value: i64) -> u64 {
    value.max(0) as u64
}
