// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Passing threshold used when a quiz does not set its own.
pub const DEFAULT_PASSING_SCORE: f64 = 70.0;

/// Default page size for attempt listings.
pub const DEFAULT_ATTEMPTS_LIMIT: i64 = 50;

/// Default number of leaderboard rows.
pub const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub port: u16,
    pub static_dir: String,
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://quiz_app.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let static_dir = env::var("STATIC_DIR")
            .unwrap_or_else(|_| "public".to_string());

        let seed_sample_data = env::var("SEED_SAMPLE_DATA")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            database_url,
            rust_log,
            port,
            static_dir,
            seed_sample_data,
        }
    }
}
