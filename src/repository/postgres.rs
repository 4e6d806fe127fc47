// src/repository/postgres.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        attempt::AttemptRecord, daily_metric::DailyMetric, leaderboard::LeaderboardRow,
        progress::TopicProgress,
    },
    repository::AnalyticsRepository,
};

/// Reads from the hosted Postgres schema. Ids are UUID columns and are
/// returned as text; nullable counters are coalesced to zero.
#[derive(Clone)]
pub struct PgAnalyticsRepository {
    pool: PgPool,
}

impl PgAnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn session_attempts(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Vec<AttemptRecord>, AppError> {
        let attempts = sqlx::query_as::<_, AttemptRecord>(
            r#"
            SELECT
                question_id::TEXT AS question_id,
                COALESCE(is_correct, FALSE) AS is_correct,
                COALESCE(time_spent_ms, 0)::BIGINT AS time_spent_ms,
                created_at AS answered_at,
                session_id::TEXT AS session_id,
                COALESCE(topic_id::TEXT, '') AS topic_id
            FROM question_attempts
            WHERE user_id::TEXT = $1 AND session_id::TEXT = $2
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch session attempts: {:?}", e);
            AppError::from(e)
        })?;

        Ok(attempts)
    }

    async fn daily_metrics(
        &self,
        user_id: &str,
        since: Option<NaiveDate>,
    ) -> Result<Vec<DailyMetric>, AppError> {
        let metrics = sqlx::query_as::<_, DailyMetric>(
            r#"
            SELECT
                metric_date AS date,
                COALESCE(total_questions, 0)::BIGINT AS total_questions,
                COALESCE(correct_answers, 0)::BIGINT AS correct_answers,
                COALESCE(total_time_ms, 0)::BIGINT AS total_time_ms,
                COALESCE(session_count, 0)::BIGINT AS session_count
            FROM user_daily_metrics
            WHERE user_id::TEXT = $1 AND ($2::DATE IS NULL OR metric_date >= $2)
            ORDER BY metric_date ASC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch daily metrics: {:?}", e);
            AppError::from(e)
        })?;

        Ok(metrics)
    }

    async fn topic_progress(&self, user_id: &str) -> Result<Vec<TopicProgress>, AppError> {
        let progress = sqlx::query_as::<_, TopicProgress>(
            r#"
            SELECT
                user_id::TEXT AS user_id,
                topic_id::TEXT AS topic_id,
                COALESCE(questions_attempted, 0)::BIGINT AS questions_attempted,
                COALESCE(questions_correct, 0)::BIGINT AS questions_correct,
                COALESCE(avg_time_ms, 0)::BIGINT AS avg_time_ms,
                COALESCE(level, 1)::INT AS level,
                last_practiced_at
            FROM user_topic_progress
            WHERE user_id::TEXT = $1
            ORDER BY topic_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch topic progress: {:?}", e);
            AppError::from(e)
        })?;

        Ok(progress)
    }

    async fn leaderboard_rows(
        &self,
        topic: Option<&str>,
    ) -> Result<Vec<LeaderboardRow>, AppError> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT
                p.user_id::TEXT AS user_id,
                COALESCE(pr.display_name, 'Anonymous') AS display_name,
                p.topic_id::TEXT AS topic_id,
                COALESCE(p.questions_attempted, 0)::BIGINT AS questions_attempted,
                COALESCE(p.questions_correct, 0)::BIGINT AS questions_correct,
                COALESCE(p.avg_time_ms, 0)::BIGINT AS avg_time_ms
            FROM user_topic_progress p
            LEFT JOIN profiles pr ON pr.id = p.user_id
            WHERE ($1::TEXT IS NULL OR p.topic_id::TEXT = $1)
              AND COALESCE(p.questions_attempted, 0) > 0
            ORDER BY p.user_id, p.topic_id
            "#,
        )
        .bind(topic)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch leaderboard rows: {:?}", e);
            AppError::from(e)
        })?;

        Ok(rows)
    }
}
