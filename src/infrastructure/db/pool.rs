use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;
use std::time::Duration;

use crate::settings::AppConfig;

/// Which SQL flavor the active backend speaks. Drives placeholder-free
/// differences in generated queries (ILIKE vs LIKE).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Postgres,
    Sqlite,
}

impl SqlDialect {
    /// Case-insensitive pattern-match operator for this dialect.
    /// SQLite LIKE is already case-insensitive for ASCII.
    pub fn like_operator(&self) -> &'static str {
        match self {
            SqlDialect::Postgres => "ILIKE",
            SqlDialect::Sqlite => "LIKE",
        }
    }
}

/// The two storage backends the API can run against. `DATABASE_URL` set
/// means Postgres, otherwise a local SQLite file.
#[derive(Clone)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    pub async fn connect(config: &AppConfig) -> Result<Self, sqlx::Error> {
        if !config.database_url.trim().is_empty() {
            let pool = create_pg_pool(&config.database_url).await?;
            Ok(Database::Postgres(pool))
        } else {
            let pool = create_sqlite_pool(&config.sqlite_path).await?;
            info!("SQLite database opened at {}", config.sqlite_path);
            Ok(Database::Sqlite(pool))
        }
    }

    pub fn dialect(&self) -> SqlDialect {
        match self {
            Database::Postgres(_) => SqlDialect::Postgres,
            Database::Sqlite(_) => SqlDialect::Sqlite,
        }
    }

    /// Liveness probe used by the health endpoint.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        match self {
            Database::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
            Database::Sqlite(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
        }
        Ok(())
    }
}

async fn create_pg_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_retries = 5;
    let mut retry_count = 0;
    let mut wait_seconds = 2;

    loop {
        match PgPoolOptions::new()
            .max_connections(20)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!("Postgres connection established.");
                return Ok(pool);
            }
            Err(e) if retry_count < max_retries => {
                retry_count += 1;
                info!(
                    "Failed to connect to database (attempt {}/{}): {}. Retrying in {}s...",
                    retry_count, max_retries, e, wait_seconds);

                tokio::time::sleep(Duration::from_secs(wait_seconds)).await;

                wait_seconds *= 2; // Exponential backoff
            }
            Err(e) => return Err(e),
        }
    }
}

async fn create_sqlite_pool(path: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
