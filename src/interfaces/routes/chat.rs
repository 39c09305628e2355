use actix_web::web;

use crate::handlers::chat::chat;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(chat);
}
