use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    entities::project::{Project, ProjectInsert},
    errors::AppError,
    infrastructure::db::Database,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_project(&self, project: &ProjectInsert) -> Result<i64, AppError>;
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn count_projects(&self) -> Result<i64, AppError>;
    async fn delete_project(&self, id: i64) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(db: Database) -> Self {
        SqlxProjectRepo { db }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<i64, AppError> {
        match &self.db {
            Database::Postgres(pool) => {
                let id = sqlx::query_scalar::<_, i64>(
                    r#"
                    INSERT INTO projects (title, description, tech_stack, github_url, project_date, created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING id
                    "#,
                )
                .bind(&project.title)
                .bind(&project.description)
                .bind(&project.tech_stack)
                .bind(&project.github_url)
                .bind(project.project_date)
                .bind(project.created_at)
                .bind(project.updated_at)
                .fetch_one(pool)
                .await?;

                Ok(id)
            }
            Database::Sqlite(pool) => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO projects (title, description, tech_stack, github_url, project_date, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )
                .bind(&project.title)
                .bind(&project.description)
                .bind(&project.tech_stack)
                .bind(&project.github_url)
                .bind(project.project_date)
                .bind(project.created_at)
                .bind(project.updated_at)
                .execute(pool)
                .await?;

                Ok(result.last_insert_rowid())
            }
        }
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let sql = r#"
            SELECT id, title, description, tech_stack, github_url, project_date, created_at, updated_at
            FROM projects
            ORDER BY created_at DESC
        "#;

        let projects = match &self.db {
            Database::Postgres(pool) => {
                sqlx::query_as::<_, Project>(sql).fetch_all(pool).await?
            }
            Database::Sqlite(pool) => {
                sqlx::query_as::<_, Project>(sql).fetch_all(pool).await?
            }
        };

        Ok(projects)
    }

    async fn count_projects(&self) -> Result<i64, AppError> {
        let sql = "SELECT COUNT(*) FROM projects";

        let count = match &self.db {
            Database::Postgres(pool) => {
                sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?
            }
            Database::Sqlite(pool) => {
                sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?
            }
        };

        Ok(count)
    }

    async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        let rows_affected = match &self.db {
            Database::Postgres(pool) => {
                sqlx::query("DELETE FROM projects WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
            Database::Sqlite(pool) => {
                sqlx::query("DELETE FROM projects WHERE id = ?1")
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
        };

        if rows_affected == 0 {
            Err(AppError::NotFound("Project not found".into()))
        } else {
            Ok(())
        }
    }
}
