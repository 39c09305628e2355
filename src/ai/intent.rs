//! Keyword intent classification and the rule-based fallback path.
//!
//! Used whenever no provider is configured, every provider fails, or the
//! model's SQL is rejected or fails to execute. Each intent carries a
//! canned dialect-aware SELECT and a prose formatter over the rows.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::infrastructure::db::SqlDialect;

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(20\d{2})\b").expect("year regex is valid"));

/// Technology names recognized in questions like "projects with Rust?".
const TECH_KEYWORDS: &[&str] = &[
    "python", "rust", "javascript", "typescript", "java", "kotlin", "swift",
    "golang", "c++", "c#", "react", "vue", "angular", "svelte", "next.js",
    "node", "flask", "django", "fastapi", "actix", "spring", "rails",
    "postgres", "postgresql", "sqlite", "mysql", "mongodb", "redis",
    "docker", "kubernetes", "aws", "azure", "terraform",
    "tensorflow", "pytorch", "machine learning", "graphql", "grpc",
    "html", "css", "tailwind",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// "how many", "number of" — answer with COUNT(*).
    Count,
    /// Questions mentioning hackathons.
    Hackathon,
    /// An explicit year, or "this year" / "last year".
    DateRange(i32),
    /// "latest", "newest", "most recent".
    MostRecent,
    /// A known technology keyword appears in the question.
    TechSearch(String),
    /// Everything else: list the portfolio.
    ListAll,
}

impl Intent {
    pub fn classify(question: &str) -> Intent {
        let q = question.to_lowercase();

        if q.contains("how many") || q.contains("number of") || q.contains("count of") {
            return Intent::Count;
        }

        if q.contains("hackathon") {
            return Intent::Hackathon;
        }

        if let Some(year) = YEAR
            .captures(&q)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<i32>().ok())
        {
            return Intent::DateRange(year);
        }
        if q.contains("this year") {
            return Intent::DateRange(Utc::now().year());
        }
        if q.contains("last year") {
            return Intent::DateRange(Utc::now().year() - 1);
        }

        if q.contains("latest") || q.contains("newest") || q.contains("most recent") {
            return Intent::MostRecent;
        }

        for keyword in TECH_KEYWORDS {
            if q.contains(keyword) {
                return Intent::TechSearch((*keyword).to_string());
            }
        }

        Intent::ListAll
    }

    /// The canned SELECT used when no model-generated SQL is available.
    /// Keywords come from a fixed list, so interpolation is safe here.
    pub fn fallback_sql(&self, dialect: SqlDialect) -> String {
        let like = dialect.like_operator();

        match self {
            Intent::Count => "SELECT COUNT(*) AS count FROM projects".to_string(),
            Intent::Hackathon => format!(
                "SELECT title, description, tech_stack FROM projects \
                 WHERE title {like} '%hackathon%' OR description {like} '%hackathon%' \
                 OR tech_stack {like} '%hackathon%' ORDER BY created_at DESC"
            ),
            Intent::DateRange(year) => format!(
                "SELECT title, description, tech_stack FROM projects \
                 WHERE created_at >= '{year}-01-01' AND created_at < '{next}-01-01' \
                 ORDER BY created_at DESC",
                next = year + 1
            ),
            Intent::MostRecent => "SELECT title, description, tech_stack FROM projects \
                 ORDER BY created_at DESC LIMIT 1"
                .to_string(),
            Intent::TechSearch(tech) => format!(
                "SELECT title, description, tech_stack FROM projects \
                 WHERE tech_stack {like} '%{tech}%' OR description {like} '%{tech}%' \
                 ORDER BY created_at DESC"
            ),
            Intent::ListAll => "SELECT title, description, tech_stack FROM projects \
                 ORDER BY created_at DESC"
                .to_string(),
        }
    }

    /// Rule-based prose answer over the executed rows, used when answer
    /// formatting via the model is unavailable.
    pub fn fallback_answer(&self, rows: &[Map<String, Value>]) -> String {
        if rows.is_empty() && !matches!(self, Intent::Count) {
            return "I couldn't find any matching projects in the portfolio.".to_string();
        }

        match self {
            Intent::Count => {
                let count = first_number(rows).unwrap_or(0);
                match count {
                    0 => "There are no projects in the portfolio yet.".to_string(),
                    1 => "There is 1 project in the portfolio.".to_string(),
                    n => format!("There are {n} projects in the portfolio."),
                }
            }
            Intent::Hackathon => format!(
                "I found {} hackathon project(s): {}.",
                rows.len(),
                list_titles(rows)
            ),
            Intent::DateRange(year) => format!(
                "I found {} project(s) from {year}: {}.",
                rows.len(),
                list_titles(rows)
            ),
            Intent::MostRecent => {
                let title = first_field(rows, "title").unwrap_or("a project".to_string());
                match first_field(rows, "description") {
                    Some(description) => {
                        format!("The most recent project is \"{title}\": {description}")
                    }
                    None => format!("The most recent project is \"{title}\"."),
                }
            }
            Intent::TechSearch(tech) => format!(
                "I found {} project(s) using {tech}: {}.",
                rows.len(),
                list_titles(rows)
            ),
            Intent::ListAll => format!(
                "The portfolio has {} project(s): {}.",
                rows.len(),
                list_titles(rows)
            ),
        }
    }
}

fn first_number(rows: &[Map<String, Value>]) -> Option<i64> {
    rows.first()?
        .values()
        .find_map(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
}

fn first_field(rows: &[Map<String, Value>], field: &str) -> Option<String> {
    rows.first()?
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn list_titles(rows: &[Map<String, Value>]) -> String {
    let titles: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get("title").and_then(Value::as_str))
        .take(5)
        .collect();

    if titles.is_empty() {
        "(untitled)".to_string()
    } else {
        titles.join(", ")
    }
}
