use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::project::new_validation_error;

const MAX_QUESTION_LENGTH: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(
        length(min = 1, max = MAX_QUESTION_LENGTH, message = "Message must be 1-500 characters"),
        custom(function = "validate_not_blank")
    )]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

fn validate_not_blank(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(new_validation_error("blank_message", "Message cannot be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_message() {
        let request = ChatRequest { message: "   ".to_string() };
        assert!(request.validate().is_err());
    }

    #[test]
    fn rejects_oversized_message() {
        let request = ChatRequest { message: "x".repeat(501) };
        assert!(request.validate().is_err());
    }

    #[test]
    fn accepts_ordinary_question() {
        let request = ChatRequest { message: "How many projects?".to_string() };
        assert!(request.validate().is_ok());
    }
}
