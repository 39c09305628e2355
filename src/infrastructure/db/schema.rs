use super::pool::Database;

/// Idempotent schema bootstrap, run once at startup. Size bounds are
/// enforced at the column level as well as in the request DTOs.
pub async fn bootstrap(db: &Database) -> Result<(), sqlx::Error> {
    match db {
        Database::Postgres(pool) => {
            for statement in POSTGRES_SCHEMA {
                sqlx::query(statement).execute(pool).await?;
            }
        }
        Database::Sqlite(pool) => {
            for statement in SQLITE_SCHEMA {
                sqlx::query(statement).execute(pool).await?;
            }
        }
    }

    Ok(())
}

const POSTGRES_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        description VARCHAR(2000) NOT NULL,
        tech_stack VARCHAR(300) NOT NULL,
        github_url VARCHAR(300),
        project_date DATE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) NOT NULL,
        message VARCHAR(1000) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_projects_created ON projects(created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_contacts_created ON contacts(created_at DESC)",
];

const SQLITE_SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL CHECK(length(title) <= 200),
        description TEXT NOT NULL CHECK(length(description) <= 2000),
        tech_stack TEXT NOT NULL CHECK(length(tech_stack) <= 300),
        github_url TEXT CHECK(github_url IS NULL OR length(github_url) <= 300),
        project_date TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL CHECK(length(name) <= 100),
        email TEXT NOT NULL CHECK(length(email) <= 100),
        message TEXT NOT NULL CHECK(length(message) <= 1000),
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_projects_created ON projects(created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_contacts_created ON contacts(created_at DESC)",
];
