use actix_session::Session;
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::core::AppError;
use crate::middleware::session_guard::{
    CurrentUser, SESSION_USER_ID, SESSION_USER_NAME, SESSION_USER_ROLE,
};
use crate::modules::users::models::LoginRequest;
use crate::modules::users::services::UserService;

/// POST /auth/login
pub async fn login(
    service: web::Data<UserService>,
    session: Session,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = service
        .authenticate(&payload.email, &payload.password)
        .await?;

    session
        .insert(SESSION_USER_ID, user.id)
        .map_err(|e| AppError::internal(e.to_string()))?;
    session
        .insert(SESSION_USER_NAME, user.name.clone())
        .map_err(|e| AppError::internal(e.to_string()))?;
    session
        .insert(SESSION_USER_ROLE, user.role.as_str())
        .map_err(|e| AppError::internal(e.to_string()))?;

    info!(user_id = user.id, "User logged in");

    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

/// GET /auth/me
pub async fn me(
    service: web::Data<UserService>,
    current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let user = service.get_user(current.id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Configure authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
