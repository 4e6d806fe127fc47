// src/handlers/leaderboard.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    config::DEFAULT_LEADERBOARD_LIMIT,
    error::AppError,
    handlers::rows_or_empty,
    models::leaderboard::{LeaderboardParams, LeaderboardResponse},
    repository::SharedRepository,
    stats::build_leaderboard,
    utils::jwt::Claims,
};

/// Ranks all users, optionally within one topic.
///
/// Returns the top `limit` entries plus the caller's own entry, which is
/// looked up before truncation so it is present wherever the caller ranks.
pub async fn get_leaderboard(
    State(repo): State<SharedRepository>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = params.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let topic = params.topic.as_deref();
    let rows = rows_or_empty(repo.leaderboard_rows(topic).await, "leaderboard rows");

    let mut entries = build_leaderboard(&rows, Some(&claims.sub), topic);
    let current_user = entries.iter().find(|e| e.is_current_user).cloned();
    entries.truncate(params.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT));

    Ok(Json(LeaderboardResponse {
        entries,
        current_user,
    }))
}
