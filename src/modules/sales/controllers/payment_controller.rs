use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::sales::models::RecordPaymentRequest;
use crate::modules::sales::services::PaymentService;

/// POST /sales/{id}/payments
pub async fn record_payment(
    service: web::Data<PaymentService>,
    _current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let payment = service
        .record_payment(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(payment))
}

/// GET /sales/{id}/payments
pub async fn list_payments(
    service: web::Data<PaymentService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let payments = service.list_payments(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(payments))
}

/// Configure payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sales/{id}/payments", web::post().to(record_payment));
    cfg.route("/sales/{id}/payments", web::get().to(list_payments));
}
