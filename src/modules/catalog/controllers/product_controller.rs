use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::catalog::models::{CreateProductRequest, UpdateProductRequest};
use crate::modules::catalog::services::CatalogService;

/// GET /products
pub async fn list_products(
    service: web::Data<CatalogService>,
    _current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let products = service.list_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

/// POST /products
pub async fn create_product(
    service: web::Data<CatalogService>,
    current: CurrentUser,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let product = service.create_product(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

/// GET /products/{id}
pub async fn get_product(
    service: web::Data<CatalogService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product = service.get_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// PUT /products/{id}
pub async fn update_product(
    service: web::Data<CatalogService>,
    current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let product = service
        .update_product(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

/// DELETE /products/{id}
pub async fn delete_product(
    service: web::Data<CatalogService>,
    current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    service.delete_product(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
