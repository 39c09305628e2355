use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    entities::contact::ContactInsert,
    errors::AppError,
    infrastructure::db::Database,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact_message(&self, msg: &ContactInsert) -> Result<i64, AppError>;
}

impl SqlxContactRepo {
    pub fn new(db: Database) -> Self {
        SqlxContactRepo { db }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact_message(&self, msg: &ContactInsert) -> Result<i64, AppError> {
        match &self.db {
            Database::Postgres(pool) => {
                let id = sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO contacts (name, email, message, created_at)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(&msg.name)
                .bind(&msg.email)
                .bind(&msg.message)
                .bind(msg.created_at)
                .fetch_one(pool)
                .await?;

                Ok(id)
            }
            Database::Sqlite(pool) => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO contacts (name, email, message, created_at)
                    VALUES (?1, ?2, ?3, ?4)
                    "#,
                )
                .bind(&msg.name)
                .bind(&msg.email)
                .bind(&msg.message)
                .bind(msg.created_at)
                .execute(pool)
                .await?;

                Ok(result.last_insert_rowid())
            }
        }
    }
}
