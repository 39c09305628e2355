//! Prompt construction and validation for LLM-generated SQL.
//!
//! The model is asked for a single SELECT over the hardcoded `projects`
//! schema and its reply is cleaned and checked before anything reaches
//! the database. Validation is the only control applied to model output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AiError;
use crate::infrastructure::db::SqlDialect;

const MAX_SQL_LENGTH: usize = 2000;

/// Marker the model is instructed to return for off-topic questions.
const INVALID_MARKER: &str = "INVALID";

static FORBIDDEN_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(INSERT|UPDATE|DELETE|DROP|ALTER|CREATE|TRUNCATE|REPLACE|GRANT|REVOKE|ATTACH|DETACH|PRAGMA|VACUUM)\b",
    )
    .expect("forbidden keyword regex is valid")
});

/// Builds the text-to-SQL prompt for a user question, embedding the
/// table description, the SELECT-only rules and a few worked examples.
pub fn build_sql_prompt(question: &str, dialect: SqlDialect) -> String {
    let flavor = match dialect {
        SqlDialect::Postgres => "PostgreSQL",
        SqlDialect::Sqlite => "SQLite",
    };
    let like = dialect.like_operator();

    format!(
        r#"You are a SQL expert. Convert this question to a {flavor} SELECT query.

DATABASE SCHEMA:
Table: projects
- id (integer)
- title (varchar 200)
- description (varchar 2000)
- tech_stack (varchar 300, comma-separated technology names)
- github_url (varchar 300, nullable)
- project_date (date, nullable)
- created_at (timestamp)

RULES:
1. Return ONLY the SQL query, nothing else
2. ONLY generate SELECT queries (no INSERT, UPDATE, DELETE)
3. For "how many" questions, use COUNT(*)
4. For "most recent", use ORDER BY created_at DESC LIMIT 1
5. For technology searches, use {like} '%technology%' on tech_stack or description
6. If the question is NOT about the portfolio projects, return exactly: INVALID

EXAMPLES:
Question: "How many projects?"
Answer: SELECT COUNT(*) FROM projects

Question: "Projects with Python?"
Answer: SELECT title, description FROM projects WHERE tech_stack {like} '%Python%' OR description {like} '%Python%'

Question: "Most recent project?"
Answer: SELECT title, description FROM projects ORDER BY created_at DESC LIMIT 1

Question: "What's the weather?"
Answer: INVALID

Now convert this question:
"{question}"

SQL Query:"#
    )
}

/// Builds the answer-formatting prompt over the executed rows.
pub fn build_answer_prompt(question: &str, results: &str) -> String {
    format!(
        r#"You are answering a question about a software engineering portfolio.

Question: {question}
Database Results: {results}

Provide a friendly, natural answer in 2-3 sentences. If no results, say you couldn't find matching projects.

Answer:"#
    )
}

/// Strips markdown fences and trailing semicolons from a model reply.
pub fn clean_response(raw: &str) -> String {
    let mut sql = raw.trim();

    if let Some(fenced) = sql.split("```sql").nth(1) {
        sql = fenced.split("```").next().unwrap_or(fenced);
    } else if let Some(fenced) = sql.split("```").nth(1) {
        sql = fenced;
    }

    sql.trim().trim_end_matches(';').trim().to_string()
}

/// Checks a cleaned model reply against the SELECT-only rules.
pub fn validate_select(sql: &str) -> Result<(), AiError> {
    if sql.is_empty() {
        return Err(AiError::RejectedSql("empty statement".into()));
    }
    if sql.len() > MAX_SQL_LENGTH {
        return Err(AiError::RejectedSql("statement too long".into()));
    }
    if sql.to_uppercase().contains(INVALID_MARKER) {
        return Err(AiError::OffTopic);
    }
    if !sql.trim_start().to_uppercase().starts_with("SELECT") {
        let head: String = sql.chars().take(50).collect();
        return Err(AiError::RejectedSql(format!("not a SELECT statement: {head}")));
    }
    if let Some(found) = FORBIDDEN_KEYWORDS.find(sql) {
        return Err(AiError::RejectedSql(format!(
            "forbidden keyword '{}'",
            found.as_str()
        )));
    }

    // No `;`-chained statements.
    let parts = sql.split(';').filter(|s| !s.trim().is_empty()).count();
    if parts > 1 {
        return Err(AiError::RejectedSql("multiple statements".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_sql_fences() {
        let raw = "```sql\nSELECT COUNT(*) FROM projects;\n```";
        assert_eq!(clean_response(raw), "SELECT COUNT(*) FROM projects");
    }

    #[test]
    fn strips_bare_fences() {
        let raw = "```\nSELECT title FROM projects\n```";
        assert_eq!(clean_response(raw), "SELECT title FROM projects");
    }

    #[test]
    fn passes_plain_select_through() {
        let raw = "  SELECT title FROM projects ORDER BY created_at DESC LIMIT 1  ";
        assert_eq!(
            clean_response(raw),
            "SELECT title FROM projects ORDER BY created_at DESC LIMIT 1"
        );
    }

    #[test]
    fn accepts_valid_select() {
        assert!(validate_select("SELECT COUNT(*) FROM projects").is_ok());
    }

    #[test]
    fn rejects_mutating_statements() {
        assert!(matches!(
            validate_select("DELETE FROM projects"),
            Err(AiError::RejectedSql(_))
        ));
        assert!(matches!(
            validate_select("SELECT * FROM projects WHERE id IN (SELECT id FROM projects); DROP TABLE projects"),
            Err(AiError::RejectedSql(_))
        ));
    }

    #[test]
    fn rejects_forbidden_keyword_inside_select() {
        let err = validate_select("SELECT * FROM projects; UPDATE projects SET title = 'x'");
        assert!(matches!(err, Err(AiError::RejectedSql(_))));
    }

    #[test]
    fn allows_keyword_as_substring_of_identifier() {
        // "created_at" contains no standalone forbidden word.
        assert!(validate_select("SELECT created_at FROM projects").is_ok());
    }

    #[test]
    fn detects_off_topic_marker() {
        assert!(matches!(validate_select("INVALID"), Err(AiError::OffTopic)));
        assert!(matches!(
            validate_select("The question is INVALID"),
            Err(AiError::OffTopic)
        ));
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!(matches!(
            validate_select(""),
            Err(AiError::RejectedSql(_))
        ));
        let long = format!("SELECT {} FROM projects", "x".repeat(MAX_SQL_LENGTH));
        assert!(matches!(
            validate_select(&long),
            Err(AiError::RejectedSql(_))
        ));
    }

    #[test]
    fn prompt_uses_dialect_operator() {
        let pg = build_sql_prompt("Projects with Rust?", SqlDialect::Postgres);
        assert!(pg.contains("ILIKE"));
        let lite = build_sql_prompt("Projects with Rust?", SqlDialect::Sqlite);
        assert!(lite.contains("LIKE") && !lite.contains("ILIKE"));
    }
}
