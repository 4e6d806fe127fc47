// src/stats/streak.rs

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate};

use crate::models::{attempt::AttemptRecord, daily_metric::DailyMetric};

/// Question counts per day. Duplicate dates are summed.
fn questions_by_day(metrics: &[DailyMetric]) -> BTreeMap<NaiveDate, i64> {
    let mut days = BTreeMap::new();
    for m in metrics {
        let total = days.entry(m.date).or_insert(0i64);
        *total = total.saturating_add(m.total_questions.max(0));
    }
    days
}

/// Consecutive active days counted backward from `today`.
///
/// Stops at the first day with no questions, whether that day is recorded
/// as zero or missing from the data. Returns 0 when `today` is inactive.
pub fn compute_streak(metrics: &[DailyMetric], today: NaiveDate) -> u32 {
    let days = questions_by_day(metrics);

    let mut streak = 0u32;
    let mut current = today;
    while days.get(&current).copied().unwrap_or(0) > 0 {
        streak += 1;
        let Some(previous) = current.pred_opt() else {
            break;
        };
        current = previous;
    }

    streak
}

/// Longest run of consecutive active days anywhere in the data.
pub fn compute_longest_streak(metrics: &[DailyMetric]) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for (date, questions) in questions_by_day(metrics) {
        if questions == 0 {
            run = 0;
            previous = None;
            continue;
        }

        run = match previous {
            Some(p) if date - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}

/// Rolls attempts up into one metric per UTC calendar day, oldest first.
pub fn daily_metrics_from_attempts(attempts: &[AttemptRecord]) -> Vec<DailyMetric> {
    let mut days: BTreeMap<NaiveDate, (DailyMetric, HashSet<&str>)> = BTreeMap::new();

    for attempt in attempts {
        let date = attempt.answered_at.date_naive();
        let (metric, sessions) = days
            .entry(date)
            .or_insert_with(|| (DailyMetric::empty(date), HashSet::new()));

        metric.total_questions += 1;
        if attempt.is_correct {
            metric.correct_answers += 1;
        }
        metric.total_time_ms = metric.total_time_ms.saturating_add(attempt.time_spent_ms.max(0));
        sessions.insert(attempt.session_id.as_str());
    }

    days.into_values()
        .map(|(mut metric, sessions)| {
            metric.session_count = sessions.len() as i64;
            metric
        })
        .collect()
}

/// One metric for each of the `days` days ending at `today`, oldest first.
/// Days missing from `metrics` are filled with empty rows; duplicates are merged.
pub fn fill_daily_range(metrics: &[DailyMetric], today: NaiveDate, days: u32) -> Vec<DailyMetric> {
    if days == 0 {
        return Vec::new();
    }
    let start = today - Duration::days(i64::from(days) - 1);

    let mut by_day: BTreeMap<NaiveDate, DailyMetric> = BTreeMap::new();
    for m in metrics.iter().filter(|m| m.date >= start && m.date <= today) {
        let merged = by_day.entry(m.date).or_insert_with(|| DailyMetric::empty(m.date));
        merged.total_questions = merged.total_questions.saturating_add(m.total_questions.max(0));
        merged.correct_answers = merged.correct_answers.saturating_add(m.correct_answers.max(0));
        merged.total_time_ms = merged.total_time_ms.saturating_add(m.total_time_ms.max(0));
        merged.session_count = merged.session_count.saturating_add(m.session_count.max(0));
    }

    start
        .iter_days()
        .take(days as usize)
        .map(|date| by_day.remove(&date).unwrap_or_else(|| DailyMetric::empty(date)))
        .collect()
}
