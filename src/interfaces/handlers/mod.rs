pub mod admin;
pub mod chat;
pub mod contact;
pub mod home;
pub mod json_error;
pub mod projects;
pub mod system;
