//! Persistence layer: pool construction, migrations, models and repositories.

use std::time::Duration;

use heroes_core::config::{self, ConfigError};
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    /// Upper bound on open connections (default: `10`).
    pub max_connections: u32,
    /// How long a request waits for a free connection (default: `30`).
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// Load from `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and
    /// `DATABASE_ACQUIRE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: config::require("DATABASE_URL")?,
            max_connections: config::parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            acquire_timeout_secs: config::parse_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 30)?,
        })
    }
}

/// Create a connection pool.
///
/// Callers that find every connection busy wait in the pool's acquire queue
/// until one is released or the acquire timeout elapses.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
