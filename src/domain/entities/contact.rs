use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

const MAX_NAME_LENGTH: u64 = 100;
const MAX_EMAIL_LENGTH: u64 = 100;
const MAX_MESSAGE_LENGTH: u64 = 1000;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewContactForm {
    #[validate(length(min = 2, max = MAX_NAME_LENGTH))]
    pub name: String,

    #[validate(email, length(max = MAX_EMAIL_LENGTH))]
    pub email: String,

    #[validate(length(min = 5, max = MAX_MESSAGE_LENGTH))]
    pub message: String,
}

#[derive(Debug, Validate)]
pub struct ContactInsert {
    #[validate(length(min = 2, max = MAX_NAME_LENGTH))]
    pub name: String,

    #[validate(email, length(max = MAX_EMAIL_LENGTH))]
    pub email: String,

    #[validate(length(min = 5, max = MAX_MESSAGE_LENGTH))]
    pub message: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ContactCreatedResponse {
    pub message: String,
    pub id: i64,
}

impl TryFrom<NewContactForm> for ContactInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewContactForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let insert = ContactInsert {
            name: value.name.trim().to_string(),
            email: value.email.trim().to_string(),
            message: value.message.trim().to_string(),
            created_at: Utc::now(),
        };

        insert.validate()?;
        Ok(insert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> NewContactForm {
        NewContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: "I'd like to talk about a role.".to_string(),
        }
    }

    #[test]
    fn accepts_valid_form() {
        assert!(ContactInsert::try_from(valid_form()).is_ok());
    }

    #[test]
    fn rejects_invalid_email() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        assert!(ContactInsert::try_from(form).is_err());
    }

    #[test]
    fn rejects_oversized_message() {
        let mut form = valid_form();
        form.message = "x".repeat(1001);
        assert!(ContactInsert::try_from(form).is_err());
    }
}
