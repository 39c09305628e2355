use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 200;
const MAX_DESCRIPTION_LENGTH: u64 = 2000;
const MAX_TECH_STACK_LENGTH: u64 = 300;
const MAX_GITHUB_URL_LENGTH: u64 = 300;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub github_url: Option<String>,
    pub project_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Validate)]
pub struct ProjectInsert {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH))]
    pub description: String,

    #[validate(length(min = 1, max = MAX_TECH_STACK_LENGTH))]
    pub tech_stack: String,

    #[validate(
        length(max = MAX_GITHUB_URL_LENGTH),
        custom(function = "validate_optional_url")
    )]
    pub github_url: Option<String>,

    pub project_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct ProjectCreatedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct ProjectDeletedResponse {
    pub message: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = MAX_DESCRIPTION_LENGTH,
        message = "Description must be 1-2000 characters"
    ))]
    pub description: String,

    #[validate(length(
        min = 1,
        max = MAX_TECH_STACK_LENGTH,
        message = "Tech stack must be 1-300 characters"
    ))]
    pub tech_stack: String,

    #[validate(
        length(max = MAX_GITHUB_URL_LENGTH, message = "GitHub URL must be at most 300 characters"),
        custom(function = "validate_optional_url")
    )]
    pub github_url: Option<String>,

    pub project_date: Option<NaiveDate>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error(
                    "invalid_url_scheme",
                    "URL must start with http:// or https://",
                ))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let github_url = value
            .github_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let insert = ProjectInsert {
            title: value.title.trim().to_string(),
            description: value.description.trim().to_string(),
            tech_stack: value.tech_stack.trim().to_string(),
            github_url,
            project_date: value.project_date,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        insert.validate()?;
        Ok(insert)
    }
}
