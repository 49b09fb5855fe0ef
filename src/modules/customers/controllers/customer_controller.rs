use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::customers::models::CustomerPayload;
use crate::modules::customers::services::CustomerService;

/// GET /customers
pub async fn list_customers(
    service: web::Data<CustomerService>,
    _current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let customers = service.list_customers().await?;
    Ok(HttpResponse::Ok().json(customers))
}

/// POST /customers
pub async fn create_customer(
    service: web::Data<CustomerService>,
    _current: CurrentUser,
    payload: web::Json<CustomerPayload>,
) -> Result<HttpResponse, AppError> {
    let customer = service.create_customer(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(customer))
}

/// GET /customers/{id}
pub async fn get_customer(
    service: web::Data<CustomerService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer = service.get_customer(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// PUT /customers/{id}
pub async fn update_customer(
    service: web::Data<CustomerService>,
    _current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<CustomerPayload>,
) -> Result<HttpResponse, AppError> {
    let customer = service
        .update_customer(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// DELETE /customers/{id}
pub async fn delete_customer(
    service: web::Data<CustomerService>,
    current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    service.delete_customer(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure customer routes.
///
/// Flat routes rather than a scope: the returns module registers
/// /customers/{id}/credit-notes, which a `/customers` scope would swallow.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/customers", web::get().to(list_customers));
    cfg.route("/customers", web::post().to(create_customer));
    cfg.route("/customers/{id}", web::get().to(get_customer));
    cfg.route("/customers/{id}", web::put().to(update_customer));
    cfg.route("/customers/{id}", web::delete().to(delete_customer));
}
