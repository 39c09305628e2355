use actix_web::{post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::chat::ChatRequest, errors::AppError, AppState};

#[post("/chat")]
#[instrument(skip(state, data))]
pub async fn chat(
    state: web::Data<AppState>,
    data: web::Json<ChatRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.chat_handler.answer(data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}
