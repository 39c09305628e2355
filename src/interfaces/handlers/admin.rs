use actix_web::{post, web, HttpResponse, Responder};
use tracing::{instrument, warn};

use crate::{
    entities::admin::{AdminVerifyRequest, AdminVerifyResponse},
    errors::AppError,
    AppState,
};

#[post("/admin/verify")]
#[instrument(skip(state, data))]
pub async fn verify_admin(
    state: web::Data<AppState>,
    data: web::Json<AdminVerifyRequest>,
) -> Result<impl Responder, AppError> {
    if data.password != state.config.admin_password {
        warn!("Admin verification failed");
        return Err(AppError::UnauthorizedAccess);
    }

    Ok(HttpResponse::Ok().json(AdminVerifyResponse { valid: true }))
}
