use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::installments::models::{FinalizeCreditRequest, PayInstallmentRequest};
use crate::modules::installments::services::InstallmentService;

/// POST /sales/{id}/finalize-credit
pub async fn finalize_credit(
    service: web::Data<InstallmentService>,
    _current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<FinalizeCreditRequest>,
) -> Result<HttpResponse, AppError> {
    let plan = service
        .finalize_credit(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(plan))
}

/// GET /sales/{id}/plan
pub async fn list_plan(
    service: web::Data<InstallmentService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let plan = service.list_plan(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(plan))
}

/// POST /sales/{id}/plan/{sequence}/pay
pub async fn pay_installment(
    service: web::Data<InstallmentService>,
    _current: CurrentUser,
    path: web::Path<(i64, i32)>,
    payload: web::Json<PayInstallmentRequest>,
) -> Result<HttpResponse, AppError> {
    let (sale_id, sequence) = path.into_inner();
    let entry = service
        .pay_installment(sale_id, sequence, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(entry))
}

/// Configure installment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/sales/{id}/finalize-credit",
        web::post().to(finalize_credit),
    );
    cfg.route("/sales/{id}/plan", web::get().to(list_plan));
    cfg.route(
        "/sales/{id}/plan/{sequence}/pay",
        web::post().to(pay_installment),
    );
}
