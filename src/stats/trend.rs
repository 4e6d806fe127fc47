// src/stats/trend.rs

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::daily_metric::DailyMetric;
use crate::stats::score::round_to;

/// Differences at or below this are treated as no change.
const TREND_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Signed percentage change relative to the previous value.
    pub percentage: f64,
}

impl Trend {
    pub fn neutral() -> Self {
        Self {
            direction: TrendDirection::Neutral,
            percentage: 0.0,
        }
    }
}

/// Direction and signed percentage change from `previous` to `current`.
/// Neutral when `previous` is zero, so this never divides by zero.
pub fn compute_trend(current: f64, previous: f64) -> Trend {
    if previous.abs() <= TREND_TOLERANCE || (current - previous).abs() <= TREND_TOLERANCE {
        return Trend::neutral();
    }

    let percentage = (current - previous) / previous * 100.0;
    let direction = if percentage > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    Trend {
        direction,
        percentage,
    }
}

/// Trends between the window ending today and the window just before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowTrends {
    pub window_days: u32,
    /// Accuracy percentage over the current window.
    pub accuracy: f64,
    pub accuracy_trend: Trend,
    /// Mean milliseconds per question over the current window.
    pub avg_speed_ms: f64,
    pub speed_trend: Trend,
    pub questions: i64,
    pub volume_trend: Trend,
}

#[derive(Default)]
struct WindowTotals {
    questions: i64,
    correct: i64,
    time_ms: i64,
}

impl WindowTotals {
    fn collect(metrics: &[DailyMetric], first: NaiveDate, last: NaiveDate) -> Self {
        metrics
            .iter()
            .filter(|m| m.date >= first && m.date <= last)
            .fold(Self::default(), |mut acc, m| {
                acc.questions = acc.questions.saturating_add(m.total_questions.max(0));
                acc.correct = acc.correct.saturating_add(m.correct_answers.max(0));
                acc.time_ms = acc.time_ms.saturating_add(m.total_time_ms.max(0));
                acc
            })
    }

    fn accuracy(&self) -> f64 {
        if self.questions == 0 {
            return 0.0;
        }
        self.correct.min(self.questions) as f64 / self.questions as f64 * 100.0
    }

    fn avg_speed_ms(&self) -> f64 {
        if self.questions == 0 {
            return 0.0;
        }
        self.time_ms as f64 / self.questions as f64
    }
}

/// Compares the `window_days` days ending at `today` with the preceding
/// window of the same length.
pub fn compute_window_trends(metrics: &[DailyMetric], today: NaiveDate, window_days: u32) -> WindowTrends {
    let window = i64::from(window_days.max(1));
    let current_start = today - Duration::days(window - 1);
    let previous_end = current_start - Duration::days(1);
    let previous_start = previous_end - Duration::days(window - 1);

    let current = WindowTotals::collect(metrics, current_start, today);
    let previous = WindowTotals::collect(metrics, previous_start, previous_end);

    WindowTrends {
        window_days: window as u32,
        accuracy: round_to(current.accuracy(), 1),
        accuracy_trend: compute_trend(current.accuracy(), previous.accuracy()),
        avg_speed_ms: current.avg_speed_ms().round(),
        speed_trend: compute_trend(current.avg_speed_ms(), previous.avg_speed_ms()),
        questions: current.questions,
        volume_trend: compute_trend(current.questions as f64, previous.questions as f64),
    }
}
