// tests/api_tests.rs

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use prep_analytics::{
    config::Config,
    models::attempt::AttemptRecord,
    repository::{InMemoryRepository, SharedRepository},
    routes,
    state::AppState,
    utils::jwt::sign_jwt,
};

const SECRET: &str = "test_secret_for_integration_tests";
const AUDIENCE: &str = "authenticated";

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(repository: SharedRepository) -> String {
    let config = Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: SECRET.to_string(),
        jwt_audience: AUDIENCE.to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
    };

    let state = AppState { repository, config };
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn token_for(user_id: &str) -> String {
    sign_jwt(user_id, SECRET, AUDIENCE, 600).unwrap()
}

fn unique_user() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn attempt(session: &str, topic: &str, correct: bool, time_ms: i64, at: DateTime<Utc>) -> AttemptRecord {
    AttemptRecord {
        question_id: uuid::Uuid::new_v4().to_string(),
        is_correct: correct,
        time_spent_ms: time_ms,
        answered_at: at,
        session_id: session.to_string(),
        topic_id: topic.to_string(),
    }
}

async fn get_json(client: &reqwest::Client, url: &str, user_id: &str) -> serde_json::Value {
    let response = client
        .get(url)
        .header("Authorization", format!("Bearer {}", token_for(user_id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200, "GET {url}");
    response.json().await.unwrap()
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app(Arc::new(InMemoryRepository::new())).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn analytics_require_valid_token() {
    let address = spawn_app(Arc::new(InMemoryRepository::new())).await;
    let client = reqwest::Client::new();

    let missing = client
        .get(&format!("{}/api/analytics/streak", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 401);

    let forged = sign_jwt("someone", "not_the_secret", AUDIENCE, 600).unwrap();
    let rejected = client
        .get(&format!("{}/api/leaderboard", address))
        .header("Authorization", format!("Bearer {}", forged))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status().as_u16(), 401);
}

#[tokio::test]
async fn session_summary_of_four_attempts() {
    let repo = Arc::new(InMemoryRepository::new());
    let user = unique_user();
    let now = Utc::now();
    for (correct, time) in [(true, 2000), (true, 3000), (false, 5000), (true, 4000)] {
        repo.record_attempt(&user, attempt("drill-1", "algebra", correct, time, now))
            .await;
    }
    // Same session id, different user: must not leak into the summary.
    repo.record_attempt(&unique_user(), attempt("drill-1", "algebra", false, 9000, now))
        .await;

    let address = spawn_app(repo).await;
    let client = reqwest::Client::new();
    let summary = get_json(
        &client,
        &format!("{}/api/analytics/sessions/drill-1", address),
        &user,
    )
    .await;

    assert_eq!(summary["total_questions"], 4);
    assert_eq!(summary["correct_answers"], 3);
    assert_eq!(summary["accuracy"], 75.0);
    assert_eq!(summary["total_time_ms"], 14000);
    assert_eq!(summary["avg_speed_ms"], 3500);
    assert!(summary["score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn unknown_session_returns_empty_summary() {
    let address = spawn_app(Arc::new(InMemoryRepository::new())).await;
    let client = reqwest::Client::new();
    let summary = get_json(
        &client,
        &format!("{}/api/analytics/sessions/nope", address),
        &unique_user(),
    )
    .await;

    assert_eq!(summary["total_questions"], 0);
    assert_eq!(summary["accuracy"], 0.0);
    assert_eq!(summary["avg_speed_ms"], 0);
    assert_eq!(summary["score"], 0.0);
}

#[tokio::test]
async fn streak_counts_back_from_today() {
    let repo = Arc::new(InMemoryRepository::new());
    let user = unique_user();
    let now = Utc::now();
    for days_ago in [0, 1, 3, 4, 5] {
        let at = now - Duration::days(days_ago);
        repo.record_attempt(&user, attempt(&format!("s{days_ago}"), "calculus", true, 1000, at))
            .await;
    }

    let address = spawn_app(repo).await;
    let client = reqwest::Client::new();
    let streak = get_json(&client, &format!("{}/api/analytics/streak", address), &user).await;

    assert_eq!(streak["current"], 2);
    assert_eq!(streak["longest"], 3);
}

#[tokio::test]
async fn overview_combines_totals_streaks_and_trends() {
    let repo = Arc::new(InMemoryRepository::new());
    let user = unique_user();
    let now = Utc::now();
    // Previous week: 2 questions, 1 correct.
    repo.record_attempt(&user, attempt("old", "mechanics", true, 4000, now - Duration::days(8)))
        .await;
    repo.record_attempt(&user, attempt("old", "mechanics", false, 4000, now - Duration::days(8)))
        .await;
    // This week: 2 questions, 2 correct.
    repo.record_attempt(&user, attempt("new", "mechanics", true, 2000, now))
        .await;
    repo.record_attempt(&user, attempt("new", "mechanics", true, 2000, now))
        .await;

    let address = spawn_app(repo).await;
    let client = reqwest::Client::new();
    let overview = get_json(&client, &format!("{}/api/analytics/overview", address), &user).await;

    assert_eq!(overview["summary"]["total_questions"], 4);
    assert_eq!(overview["summary"]["correct_answers"], 3);
    assert_eq!(overview["sessions"], 2);
    assert_eq!(overview["current_streak"], 1);
    assert_eq!(overview["longest_streak"], 1);
    assert_eq!(overview["trends"]["window_days"], 7);
    assert_eq!(overview["trends"]["accuracy"], 100.0);
    assert_eq!(overview["trends"]["accuracy_trend"]["direction"], "up");
    assert_eq!(overview["trends"]["speed_trend"]["direction"], "down");
    assert_eq!(overview["trends"]["volume_trend"]["direction"], "neutral");
}

#[tokio::test]
async fn overview_summary_covers_whole_history() {
    let repo = Arc::new(InMemoryRepository::new());
    let user = unique_user();
    let now = Utc::now();
    repo.record_attempt(&user, attempt("long-ago", "vectors", true, 3000, now - Duration::days(400)))
        .await;
    repo.record_attempt(&user, attempt("long-ago", "vectors", true, 3000, now - Duration::days(399)))
        .await;
    repo.record_attempt(&user, attempt("today", "vectors", false, 1000, now))
        .await;

    let address = spawn_app(repo).await;
    let client = reqwest::Client::new();
    let overview = get_json(&client, &format!("{}/api/analytics/overview", address), &user).await;

    assert_eq!(overview["summary"]["total_questions"], 3);
    assert_eq!(overview["summary"]["correct_answers"], 2);
    assert_eq!(overview["sessions"], 3);
    assert_eq!(overview["current_streak"], 1);
    assert_eq!(overview["longest_streak"], 2);

    let streak = get_json(&client, &format!("{}/api/analytics/streak", address), &user).await;
    assert_eq!(streak["longest"], 2);
}

#[tokio::test]
async fn overview_rejects_out_of_range_window() {
    let address = spawn_app(Arc::new(InMemoryRepository::new())).await;
    let client = reqwest::Client::new();
    let response = client
        .get(&format!("{}/api/analytics/overview?window_days=0", address))
        .header("Authorization", format!("Bearer {}", token_for("u")))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("window_days"));
}

#[tokio::test]
async fn daily_metrics_fill_requested_range() {
    let repo = Arc::new(InMemoryRepository::new());
    let user = unique_user();
    let now = Utc::now();
    repo.record_attempt(&user, attempt("s", "algebra", true, 1500, now - Duration::days(2)))
        .await;

    let address = spawn_app(repo).await;
    let client = reqwest::Client::new();
    let days = get_json(&client, &format!("{}/api/analytics/daily?days=7", address), &user).await;
    let days = days.as_array().unwrap();

    assert_eq!(days.len(), 7);
    let counts: Vec<i64> = days
        .iter()
        .map(|d| d["total_questions"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![0, 0, 0, 0, 1, 0, 0]);
    assert_eq!(days[6]["date"], now.date_naive().to_string());
}

#[tokio::test]
async fn topic_insights_rank_topics() {
    let repo = Arc::new(InMemoryRepository::new());
    let user = unique_user();
    let now = Utc::now();
    for i in 0..6 {
        repo.record_attempt(&user, attempt("s", "algebra", true, 1000, now))
            .await;
        repo.record_attempt(&user, attempt("s", "probability", i < 2, 1000, now))
            .await;
    }

    let address = spawn_app(repo).await;
    let client = reqwest::Client::new();
    let insights = get_json(&client, &format!("{}/api/analytics/topics", address), &user).await;

    assert_eq!(insights["topics"].as_array().unwrap().len(), 2);
    assert_eq!(insights["strongest"]["topic_id"], "algebra");
    assert_eq!(insights["weakest"]["topic_id"], "probability");
    assert_eq!(insights["needs_practice"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn leaderboard_ranks_users_and_reports_caller() {
    let repo = Arc::new(InMemoryRepository::new());
    let now = Utc::now();
    let (ada, bea, cal) = (unique_user(), unique_user(), unique_user());
    repo.set_display_name(&ada, "Ada").await;
    repo.set_display_name(&bea, "Bea").await;

    for i in 0..20 {
        repo.record_attempt(&ada, attempt("a", "algebra", true, 20_000, now))
            .await;
        repo.record_attempt(&bea, attempt("b", "algebra", i % 2 == 0, 20_000, now))
            .await;
        repo.record_attempt(&cal, attempt("c", "calculus", i < 5, 60_000, now))
            .await;
    }

    let address = spawn_app(repo).await;
    let client = reqwest::Client::new();

    let board = get_json(&client, &format!("{}/api/leaderboard", address), &cal).await;
    let entries = board["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["display_name"], "Ada");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["display_name"], "Bea");
    assert_eq!(entries[2]["user_id"], cal.as_str());
    assert_eq!(entries[2]["display_name"], "Anonymous");
    assert_eq!(entries[2]["is_current_user"], true);

    // The caller's entry survives truncation.
    let top = get_json(&client, &format!("{}/api/leaderboard?limit=1", address), &cal).await;
    assert_eq!(top["entries"].as_array().unwrap().len(), 1);
    assert_eq!(top["current_user"]["rank"], 3);

    // Topic filter drops users without rows in that topic.
    let calculus = get_json(
        &client,
        &format!("{}/api/leaderboard?topic=calculus", address),
        &ada,
    )
    .await;
    assert_eq!(calculus["entries"].as_array().unwrap().len(), 1);
    assert!(calculus["current_user"].is_null());
}

#[tokio::test]
async fn leaderboard_rejects_invalid_limit() {
    let address = spawn_app(Arc::new(InMemoryRepository::new())).await;
    let client = reqwest::Client::new();

    for query in ["limit=0", "limit=101", "limit=abc"] {
        let response = client
            .get(&format!("{}/api/leaderboard?{}", address, query))
            .header("Authorization", format!("Bearer {}", token_for("u")))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400, "{query}");
    }
}

#[tokio::test]
async fn repository_outage_degrades_to_empty_results() {
    let address = spawn_app(Arc::new(InMemoryRepository::unavailable())).await;
    let client = reqwest::Client::new();
    let user = unique_user();

    let overview = get_json(&client, &format!("{}/api/analytics/overview", address), &user).await;
    assert_eq!(overview["summary"]["total_questions"], 0);
    assert_eq!(overview["current_streak"], 0);
    assert_eq!(overview["trends"]["accuracy_trend"]["direction"], "neutral");

    let board = get_json(&client, &format!("{}/api/leaderboard", address), &user).await;
    assert_eq!(board["entries"].as_array().unwrap().len(), 0);
    assert!(board["current_user"].is_null());

    let topics = get_json(&client, &format!("{}/api/analytics/topics", address), &user).await;
    assert!(topics["strongest"].is_null());
}
