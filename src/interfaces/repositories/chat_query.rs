use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::{Map, Value};

use crate::{
    constants::MAX_CHAT_ROWS,
    errors::AppError,
    infrastructure::db::{rows, Database},
    repositories::sqlx_repo::SqlxChatQueryRepo,
};

/// Read-only runner for validated model SQL on the chat path. Rows are
/// decoded dynamically since the column set is model-chosen.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatQueryRunner: Send + Sync {
    async fn run_select(&self, sql: &str) -> Result<Vec<Map<String, Value>>, AppError>;
}

impl SqlxChatQueryRepo {
    pub fn new(db: Database) -> Self {
        SqlxChatQueryRepo { db }
    }
}

#[async_trait]
impl ChatQueryRunner for SqlxChatQueryRepo {
    async fn run_select(&self, sql: &str) -> Result<Vec<Map<String, Value>>, AppError> {
        let decoded = match &self.db {
            Database::Postgres(pool) => sqlx::query(sql)
                .fetch_all(pool)
                .await?
                .iter()
                .take(MAX_CHAT_ROWS)
                .map(rows::pg_row_to_json)
                .collect(),
            Database::Sqlite(pool) => sqlx::query(sql)
                .fetch_all(pool)
                .await?
                .iter()
                .take(MAX_CHAT_ROWS)
                .map(rows::sqlite_row_to_json)
                .collect(),
        };

        Ok(decoded)
    }
}
