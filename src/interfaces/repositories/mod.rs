pub mod chat_query;
pub mod contact;
pub mod project;
pub mod sqlx_repo;
