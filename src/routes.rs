// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{analytics, leaderboard},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Every analytics route requires a valid access token.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (repository and config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let analytics_routes = Router::new()
        .route("/overview", get(analytics::get_overview))
        .route("/streak", get(analytics::get_streak))
        .route("/daily", get(analytics::get_daily_metrics))
        .route("/topics", get(analytics::get_topic_insights))
        .route("/sessions/{session_id}", get(analytics::get_session_summary));

    let protected_routes = Router::new()
        .nest("/api/analytics", analytics_routes)
        .route("/api/leaderboard", get(leaderboard::get_leaderboard))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(protected_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
