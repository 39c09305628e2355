use actix_web::web;

use crate::handlers::projects::{create_project, delete_project, get_projects};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_projects)
        .service(create_project)
        .service(delete_project);
}
