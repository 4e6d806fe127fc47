// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Leaderboard size when the client does not ask for one.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 50;

/// Days compared by the overview trends when no window is given.
pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 7;

/// Days returned by the daily metrics view when no range is given.
pub const DEFAULT_DAILY_RANGE_DAYS: u32 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Project JWT secret used by the auth provider to sign access tokens.
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub rust_log: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_audience =
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_audience,
            rust_log,
            bind_addr,
        }
    }
}
