pub mod admin;
pub mod chat;
pub mod contact;
pub mod project;
