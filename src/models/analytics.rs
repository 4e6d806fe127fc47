// src/models/analytics.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::stats::{SessionSummary, WindowTrends};

/// Response for `GET /api/analytics/overview`.
#[derive(Debug, Serialize, Deserialize)]
pub struct OverviewResponse {
    /// Totals over the loaded history.
    pub summary: SessionSummary,
    pub sessions: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub trends: WindowTrends,
}

/// Response for `GET /api/analytics/streak`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub current: u32,
    pub longest: u32,
}

/// Query parameters for `GET /api/analytics/overview`.
#[derive(Debug, Deserialize, Validate)]
pub struct OverviewParams {
    #[validate(range(min = 1, max = 90, message = "window_days must be between 1 and 90"))]
    pub window_days: Option<u32>,
}

/// Query parameters for `GET /api/analytics/daily`.
#[derive(Debug, Deserialize, Validate)]
pub struct DailyParams {
    #[validate(range(min = 1, max = 365, message = "days must be between 1 and 365"))]
    pub days: Option<u32>,
}
