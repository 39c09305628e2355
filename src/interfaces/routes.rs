use actix_web::web;

use crate::handlers::{home::home, json_error::not_found};

mod admin;
mod chat;
mod contact;
mod json_error;
mod projects;
mod system;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(projects::config_routes)
            .configure(contact::config_routes)
            .configure(admin::config_routes)
            .configure(chat::config_routes)
            .configure(system::config_routes),
    );

    cfg.configure(json_error::config_routes);
    cfg.default_service(web::route().to(not_found));
}
