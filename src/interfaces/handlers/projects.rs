use actix_web::{delete, get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::project::NewProjectRequest, errors::AppError, AppState};

#[get("/projects")]
#[instrument(skip(state))]
pub async fn get_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let response = state.project_handler.list_projects().await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/projects")]
#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.create_project(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[delete("/projects/{id}")]
#[instrument(skip(state))]
pub async fn delete_project(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.delete_project(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}
