use crate::{
    entities::contact::{ContactCreatedResponse, NewContactForm},
    errors::AppError,
    repositories::contact::ContactRepository,
};
use validator::Validate;

pub struct ContactHandler<R>
where
    R: ContactRepository,
{
    pub contact_repo: R,
}

impl<R> ContactHandler<R>
where
    R: ContactRepository,
{
    pub fn new(contact_repo: R) -> Self {
        ContactHandler { contact_repo }
    }

    /// Handles the creation of a new contact message
    pub async fn create_contact_message(
        &self,
        request: NewContactForm,
    ) -> Result<ContactCreatedResponse, AppError> {
        request.validate()?;

        let new_msg = request.try_into()?;

        let id = self.contact_repo.create_contact_message(&new_msg).await?;

        Ok(ContactCreatedResponse {
            message: "Your message has been received.".to_string(),
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::contact::MockContactRepository;

    #[actix_rt::test]
    async fn create_contact_message_returns_new_id() {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact_message().returning(|_| Ok(3));

        let handler = ContactHandler::new(repo);
        let response = handler
            .create_contact_message(NewContactForm {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                message: "I'd like to talk about a role.".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.id, 3);
    }

    #[actix_rt::test]
    async fn invalid_email_never_reaches_repo() {
        let mut repo = MockContactRepository::new();
        repo.expect_create_contact_message().never();

        let handler = ContactHandler::new(repo);
        let err = handler
            .create_contact_message(NewContactForm {
                name: "Ada".to_string(),
                email: "nope".to_string(),
                message: "hello there".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
