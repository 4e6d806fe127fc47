// src/handlers/mod.rs

pub mod analytics;
pub mod leaderboard;

use crate::error::AppError;

/// Treats a failed read as "no data".
///
/// The aggregators are total over empty input, so an outage degrades the
/// analytics views to their zero values instead of failing the request.
pub(crate) fn rows_or_empty<T>(result: Result<Vec<T>, AppError>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!("Failed to load {}, treating as no data: {}", what, e);
        Vec::new()
    })
}
