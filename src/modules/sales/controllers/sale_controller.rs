use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::sales::models::{
    AddLineItemRequest, AnnulSaleRequest, OpenSaleRequest, UpdateNotesRequest,
};
use crate::modules::sales::services::SaleService;

/// GET /sales
pub async fn list_sales(
    service: web::Data<SaleService>,
    _current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let sales = service.list_sales().await?;
    Ok(HttpResponse::Ok().json(sales))
}

/// POST /sales
pub async fn open_sale(
    service: web::Data<SaleService>,
    _current: CurrentUser,
    payload: web::Json<OpenSaleRequest>,
) -> Result<HttpResponse, AppError> {
    let sale = service.open_sale(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(sale))
}

/// GET /sales/{id}
pub async fn get_sale(
    service: web::Data<SaleService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let sale = service.get_sale(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sale))
}

/// PUT /sales/{id}/notes
pub async fn update_notes(
    service: web::Data<SaleService>,
    _current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<UpdateNotesRequest>,
) -> Result<HttpResponse, AppError> {
    let sale = service
        .update_notes(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(sale))
}

/// POST /sales/{id}/items
pub async fn add_line_item(
    service: web::Data<SaleService>,
    _current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<AddLineItemRequest>,
) -> Result<HttpResponse, AppError> {
    let sale = service
        .add_line_item(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(sale))
}

/// DELETE /sales/{id}/items/{item_id}
pub async fn remove_line_item(
    service: web::Data<SaleService>,
    _current: CurrentUser,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (sale_id, item_id) = path.into_inner();
    let sale = service.remove_line_item(sale_id, item_id).await?;
    Ok(HttpResponse::Ok().json(sale))
}

/// POST /sales/{id}/finalize-cash
pub async fn finalize_cash(
    service: web::Data<SaleService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let sale = service.finalize_cash(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sale))
}

/// POST /sales/{id}/annul
pub async fn annul_sale(
    service: web::Data<SaleService>,
    current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<AnnulSaleRequest>,
) -> Result<HttpResponse, AppError> {
    let sale = service
        .annul_sale(path.into_inner(), payload.into_inner(), &current)
        .await?;
    Ok(HttpResponse::Ok().json(sale))
}

/// Configure sale routes.
///
/// Registered as flat routes rather than a `/sales` scope: other modules
/// (payments, installments, returns, receipts) also hang routes under
/// /sales/{id}, and a scope would swallow those paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sales", web::get().to(list_sales));
    cfg.route("/sales", web::post().to(open_sale));
    cfg.route("/sales/{id}", web::get().to(get_sale));
    cfg.route("/sales/{id}/notes", web::put().to(update_notes));
    cfg.route("/sales/{id}/items", web::post().to(add_line_item));
    cfg.route(
        "/sales/{id}/items/{item_id}",
        web::delete().to(remove_line_item),
    );
    cfg.route("/sales/{id}/finalize-cash", web::post().to(finalize_cash));
    cfg.route("/sales/{id}/annul", web::post().to(annul_sale));
}
