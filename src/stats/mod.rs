// src/stats/mod.rs

//! Pure analytics over attempt, progress and daily-metric rows.
//!
//! Nothing in this module performs I/O. Every function is total: empty input
//! produces the documented zero value instead of an error, so callers can
//! substitute an empty slice when a fetch fails.

pub mod insights;
pub mod leaderboard;
pub mod score;
pub mod session;
pub mod streak;
pub mod trend;

pub use insights::{TopicBreakdown, TopicInsights, compute_topic_insights};
pub use leaderboard::{aggregate_progress, build_leaderboard};
pub use score::{ScoreInput, compute_leaderboard_score};
pub use session::{
    SessionSummary, compute_session_summary, summarize, totals_from_attempts, totals_from_daily,
};
pub use streak::{
    compute_longest_streak, compute_streak, daily_metrics_from_attempts, fill_daily_range,
};
pub use trend::{Trend, TrendDirection, WindowTrends, compute_trend, compute_window_trends};
