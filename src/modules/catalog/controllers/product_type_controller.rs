use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::catalog::models::{
    CreateAttributeRequest, CreateOptionRequest, CreateProductTypeRequest,
};
use crate::modules::catalog::services::CatalogService;

/// GET /product-types
pub async fn list_product_types(
    service: web::Data<CatalogService>,
    _current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let types = service.list_product_types().await?;
    Ok(HttpResponse::Ok().json(types))
}

/// POST /product-types
pub async fn create_product_type(
    service: web::Data<CatalogService>,
    current: CurrentUser,
    payload: web::Json<CreateProductTypeRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let product_type = service.create_product_type(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(product_type))
}

/// GET /product-types/{id}
pub async fn get_product_type(
    service: web::Data<CatalogService>,
    _current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product_type = service.get_product_type(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product_type))
}

/// DELETE /product-types/{id}
pub async fn delete_product_type(
    service: web::Data<CatalogService>,
    current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    service.delete_product_type(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /product-types/{id}/attributes
pub async fn add_attribute(
    service: web::Data<CatalogService>,
    current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<CreateAttributeRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let product_type = service
        .add_attribute(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(product_type))
}

/// DELETE /attributes/{id}
pub async fn remove_attribute(
    service: web::Data<CatalogService>,
    current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    service.remove_attribute(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /attributes/{id}/options
pub async fn add_option(
    service: web::Data<CatalogService>,
    current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<CreateOptionRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let attribute = service
        .add_option(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(attribute))
}

/// Configure product type routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/product-types")
            .route("", web::get().to(list_product_types))
            .route("", web::post().to(create_product_type))
            .route("/{id}", web::get().to(get_product_type))
            .route("/{id}", web::delete().to(delete_product_type))
            .route("/{id}/attributes", web::post().to(add_attribute)),
    );
    cfg.service(
        web::scope("/attributes")
            .route("/{id}", web::delete().to(remove_attribute))
            .route("/{id}/options", web::post().to(add_option)),
    );
}
