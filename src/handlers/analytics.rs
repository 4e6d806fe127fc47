// src/handlers/analytics.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{Duration, NaiveDate, Utc};
use validator::Validate;

use crate::{
    config::{DEFAULT_DAILY_RANGE_DAYS, DEFAULT_TREND_WINDOW_DAYS},
    error::AppError,
    handlers::rows_or_empty,
    models::analytics::{DailyParams, OverviewParams, OverviewResponse, StreakResponse},
    repository::SharedRepository,
    stats::{
        compute_longest_streak, compute_session_summary, compute_streak, compute_topic_insights,
        compute_window_trends, fill_daily_range, summarize, totals_from_daily,
    },
    utils::jwt::Claims,
};

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// First day of a `days`-long range ending today.
fn range_start(today: NaiveDate, days: u32) -> NaiveDate {
    today - Duration::days(i64::from(days.max(1)) - 1)
}

/// Summary of the caller's attempts in one practice session.
/// An unknown session yields the empty summary.
pub async fn get_session_summary(
    State(repo): State<SharedRepository>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let attempts = rows_or_empty(
        repo.session_attempts(&claims.sub, &session_id).await,
        "session attempts",
    );

    Ok(Json(compute_session_summary(&attempts)))
}

/// Lifetime totals, streaks and recent trends for the caller.
/// Loads the caller's whole daily history.
pub async fn get_overview(
    State(repo): State<SharedRepository>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<OverviewParams>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = params.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let today = today();
    let window_days = params.window_days.unwrap_or(DEFAULT_TREND_WINDOW_DAYS);
    let metrics = rows_or_empty(
        repo.daily_metrics(&claims.sub, None).await,
        "daily metrics",
    );

    let totals = totals_from_daily(&metrics);
    tracing::debug!(
        "Overview for {}: {} days, {} questions",
        claims.sub,
        metrics.len(),
        totals.total_questions
    );

    Ok(Json(OverviewResponse {
        summary: summarize(&totals),
        sessions: totals.session_count,
        current_streak: compute_streak(&metrics, today),
        longest_streak: compute_longest_streak(&metrics),
        trends: compute_window_trends(&metrics, today, window_days),
    }))
}

/// Current and longest daily practice streak.
pub async fn get_streak(
    State(repo): State<SharedRepository>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let today = today();
    let metrics = rows_or_empty(
        repo.daily_metrics(&claims.sub, None).await,
        "daily metrics",
    );

    Ok(Json(StreakResponse {
        current: compute_streak(&metrics, today),
        longest: compute_longest_streak(&metrics),
    }))
}

/// One row per day for the requested range, gaps filled with zeroes.
pub async fn get_daily_metrics(
    State(repo): State<SharedRepository>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<DailyParams>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = params.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let today = today();
    let days = params.days.unwrap_or(DEFAULT_DAILY_RANGE_DAYS);
    let metrics = rows_or_empty(
        repo.daily_metrics(&claims.sub, Some(range_start(today, days))).await,
        "daily metrics",
    );

    Ok(Json(fill_daily_range(&metrics, today, days)))
}

/// Per-topic breakdown with strongest/weakest topics.
pub async fn get_topic_insights(
    State(repo): State<SharedRepository>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let progress = rows_or_empty(repo.topic_progress(&claims.sub).await, "topic progress");

    Ok(Json(compute_topic_insights(&progress, today())))
}
