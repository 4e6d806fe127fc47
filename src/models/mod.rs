// src/models/mod.rs

pub mod analytics;
pub mod attempt;
pub mod daily_metric;
pub mod leaderboard;
pub mod progress;
