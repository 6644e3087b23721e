use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::env;
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(env_or("DB_MAX_CONNECTIONS", 20))
        .min_connections(env_or("DB_MIN_CONNECTIONS", 5))
        .acquire_timeout(Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 3)))
        .idle_timeout(Duration::from_secs(env_or("DB_IDLE_TIMEOUT_SECS", 600)))
        .connect(database_url)
        .await
}
