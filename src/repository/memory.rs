// src/repository/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{
        attempt::AttemptRecord, daily_metric::DailyMetric, leaderboard::LeaderboardRow,
        progress::TopicProgress,
    },
    repository::AnalyticsRepository,
    stats::daily_metrics_from_attempts,
};

#[derive(Default)]
struct Store {
    /// (user_id, attempt) in insertion order.
    attempts: Vec<(String, AttemptRecord)>,
    display_names: HashMap<String, String>,
}

/// Repository backed by attempts held in memory.
///
/// Daily metrics and topic progress are derived from the stored attempts the
/// same way the hosted tables are maintained, so the analytics views can be
/// exercised without a database.
#[derive(Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
    unavailable: bool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every read fails, as if the database were down.
    pub fn unavailable() -> Self {
        Self {
            store: RwLock::default(),
            unavailable: true,
        }
    }

    pub async fn set_display_name(&self, user_id: &str, display_name: &str) {
        self.store
            .write()
            .await
            .display_names
            .insert(user_id.to_string(), display_name.to_string());
    }

    pub async fn record_attempt(&self, user_id: &str, attempt: AttemptRecord) {
        self.store
            .write()
            .await
            .attempts
            .push((user_id.to_string(), attempt));
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::InternalServerError(
                "in-memory repository marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

impl Store {
    fn attempts_of<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a AttemptRecord> {
        self.attempts
            .iter()
            .filter(move |(owner, _)| owner == user_id)
            .map(|(_, attempt)| attempt)
    }

    /// Topic progress per user, in first-attempt order.
    fn progress(&self) -> Vec<TopicProgress> {
        let mut progress: Vec<TopicProgress> = Vec::new();
        for (user_id, attempt) in &self.attempts {
            let position = progress
                .iter()
                .position(|p| &p.user_id == user_id && p.topic_id == attempt.topic_id);
            let row = match position {
                Some(i) => &mut progress[i],
                None => {
                    progress.push(TopicProgress::new(user_id.as_str(), attempt.topic_id.as_str()));
                    let last = progress.len() - 1;
                    &mut progress[last]
                }
            };
            row.record_attempt(attempt);
        }
        progress
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryRepository {
    async fn session_attempts(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Vec<AttemptRecord>, AppError> {
        self.check_available()?;
        let store = self.store.read().await;
        Ok(store
            .attempts_of(user_id)
            .filter(|a| a.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn daily_metrics(
        &self,
        user_id: &str,
        since: Option<NaiveDate>,
    ) -> Result<Vec<DailyMetric>, AppError> {
        self.check_available()?;
        let store = self.store.read().await;
        let attempts: Vec<AttemptRecord> = store.attempts_of(user_id).cloned().collect();
        Ok(daily_metrics_from_attempts(&attempts)
            .into_iter()
            .filter(|m| since.is_none_or(|since| m.date >= since))
            .collect())
    }

    async fn topic_progress(&self, user_id: &str) -> Result<Vec<TopicProgress>, AppError> {
        self.check_available()?;
        let store = self.store.read().await;
        Ok(store
            .progress()
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect())
    }

    async fn leaderboard_rows(
        &self,
        topic: Option<&str>,
    ) -> Result<Vec<LeaderboardRow>, AppError> {
        self.check_available()?;
        let store = self.store.read().await;
        Ok(store
            .progress()
            .into_iter()
            .filter(|p| topic.is_none_or(|t| p.topic_id == t))
            .map(|p| LeaderboardRow {
                display_name: store
                    .display_names
                    .get(&p.user_id)
                    .cloned()
                    .unwrap_or_else(|| "Anonymous".to_string()),
                user_id: p.user_id,
                topic_id: p.topic_id,
                questions_attempted: p.questions_attempted,
                questions_correct: p.questions_correct,
                avg_time_ms: p.avg_time_ms,
            })
            .collect())
    }
}
