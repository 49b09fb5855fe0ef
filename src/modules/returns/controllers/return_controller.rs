use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::returns::models::{CreateReturnRequest, RedeemCreditNoteRequest};
use crate::modules::returns::services::ReturnService;

/// POST /sales/{id}/returns
pub async fn process_return(
    service: web::Data<ReturnService>,
    current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<CreateReturnRequest>,
) -> Result<HttpResponse, AppError> {
    let outcome = service
        .process_return(path.into_inner(), payload.into_inner(), &current)
        .await?;
    Ok(HttpResponse::Created().json(outcome))
}

/// GET /sales/{id}/returns
pub async fn list_returns(
    service: web::Data<ReturnService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let returns = service.list_returns(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(returns))
}

/// GET /customers/{id}/credit-notes
pub async fn list_credit_notes(
    service: web::Data<ReturnService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let notes = service.list_credit_notes(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(notes))
}

/// POST /credit-notes/{id}/redeem
pub async fn redeem_credit_note(
    service: web::Data<ReturnService>,
    _current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<RedeemCreditNoteRequest>,
) -> Result<HttpResponse, AppError> {
    let note = service
        .redeem_credit_note(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(note))
}

/// Configure return and credit note routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sales/{id}/returns", web::post().to(process_return));
    cfg.route("/sales/{id}/returns", web::get().to(list_returns));
    cfg.route(
        "/customers/{id}/credit-notes",
        web::get().to(list_credit_notes),
    );
    cfg.route(
        "/credit-notes/{id}/redeem",
        web::post().to(redeem_credit_note),
    );
}
