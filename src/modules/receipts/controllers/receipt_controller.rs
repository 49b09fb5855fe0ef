use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::receipts::services::ReceiptService;

/// POST /sales/{id}/receipt
pub async fn generate_receipt(
    service: web::Data<ReceiptService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let artifact = service.generate_receipt(path.into_inner()).await?;
    Ok(HttpResponse::Created().json(artifact))
}

/// Configure receipt routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sales/{id}/receipt", web::post().to(generate_receipt));
}
