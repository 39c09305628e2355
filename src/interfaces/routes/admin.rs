use actix_web::web;

use crate::handlers::admin::verify_admin;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(verify_admin);
}
