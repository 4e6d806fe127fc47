// src/repository/mod.rs

//! Read access to the practice data owned by the hosted Postgres project.
//!
//! Handlers receive an [`AnalyticsRepository`] through [`crate::state::AppState`]
//! instead of reaching for a global client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::AppError,
    models::{
        attempt::AttemptRecord, daily_metric::DailyMetric, leaderboard::LeaderboardRow,
        progress::TopicProgress,
    },
};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PgAnalyticsRepository;

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Attempts of one user in one session, in submission order.
    async fn session_attempts(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Vec<AttemptRecord>, AppError>;

    /// Daily rollups of one user from `since` (inclusive), oldest first.
    /// `None` returns the whole history.
    async fn daily_metrics(
        &self,
        user_id: &str,
        since: Option<NaiveDate>,
    ) -> Result<Vec<DailyMetric>, AppError>;

    /// One row per topic the user has practised.
    async fn topic_progress(&self, user_id: &str) -> Result<Vec<TopicProgress>, AppError>;

    /// Progress rows of every user with their display name, optionally for one topic.
    async fn leaderboard_rows(
        &self,
        topic: Option<&str>,
    ) -> Result<Vec<LeaderboardRow>, AppError>;
}

pub type SharedRepository = Arc<dyn AnalyticsRepository>;
