// src/stats/leaderboard.rs

use std::collections::HashMap;

use crate::models::leaderboard::{LeaderboardEntry, LeaderboardRow};
use crate::stats::score::{ScoreInput, non_negative};
use crate::stats::session::summarize;

/// Sums per-topic progress rows into one set of totals.
///
/// Attempted and correct counts are summed. Total time is
/// `avg_time_ms * attempted` per topic, which makes the resulting average an
/// attempt-weighted mean of the per-topic averages.
pub fn aggregate_progress<'a, I>(rows: I) -> ScoreInput
where
    I: IntoIterator<Item = &'a LeaderboardRow>,
{
    rows.into_iter().fold(ScoreInput::default(), |mut acc, row| {
        let attempted = non_negative(row.questions_attempted);
        let time_ms = non_negative(row.avg_time_ms).saturating_mul(attempted);
        acc.total_questions = acc.total_questions.saturating_add(attempted);
        acc.correct_answers = acc
            .correct_answers
            .saturating_add(non_negative(row.questions_correct).min(attempted));
        acc.total_time_ms = acc.total_time_ms.saturating_add(time_ms);
        acc
    })
}

/// Ranks users by score, highest first.
///
/// * `topic_filter` keeps only rows for that topic.
/// * Users appear once; their rows are combined with [`aggregate_progress`].
/// * Users without attempts are dropped.
/// * Ties keep the order in which users first appear in `rows`.
pub fn build_leaderboard(
    rows: &[LeaderboardRow],
    current_user_id: Option<&str>,
    topic_filter: Option<&str>,
) -> Vec<LeaderboardEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&LeaderboardRow>> = HashMap::new();

    for row in rows
        .iter()
        .filter(|r| topic_filter.is_none_or(|topic| r.topic_id == topic))
    {
        grouped
            .entry(row.user_id.as_str())
            .or_insert_with(|| {
                order.push(row.user_id.as_str());
                Vec::new()
            })
            .push(row);
    }

    let mut entries: Vec<LeaderboardEntry> = order
        .into_iter()
        .filter_map(|user_id| {
            let user_rows = grouped.remove(user_id)?;
            let totals = aggregate_progress(user_rows.iter().copied());
            if totals.total_questions == 0 {
                return None;
            }

            let summary = summarize(&totals);
            Some(LeaderboardEntry {
                rank: 0,
                user_id: user_id.to_string(),
                display_name: user_rows[0].display_name.clone(),
                score: summary.score,
                accuracy: summary.accuracy,
                avg_speed_ms: summary.avg_speed_ms,
                questions_answered: summary.total_questions,
                is_current_user: current_user_id == Some(user_id),
            })
        })
        .collect();

    // `sort_by` is stable, so equal scores keep first-seen order.
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    entries
}
