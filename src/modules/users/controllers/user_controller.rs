use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::users::models::{CreateUserRequest, UpdateUserRequest};
use crate::modules::users::services::UserService;

/// GET /users
pub async fn list_users(
    service: web::Data<UserService>,
    current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let users = service.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// POST /users
pub async fn create_user(
    service: web::Data<UserService>,
    current: CurrentUser,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let user = service.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// GET /users/{id}
pub async fn get_user(
    service: web::Data<UserService>,
    current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let user = service.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/{id}
pub async fn update_user(
    service: web::Data<UserService>,
    current: CurrentUser,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let user = service
        .update_user(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    service: web::Data<UserService>,
    current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    service.delete_user(path.into_inner(), current.id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure user management routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
