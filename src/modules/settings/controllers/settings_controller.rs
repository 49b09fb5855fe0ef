use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::settings::models::{UpdateProfileRequest, UpdateRatesRequest};
use crate::modules::settings::services::SettingsService;

/// GET /settings
pub async fn get_settings(
    service: web::Data<SettingsService>,
    _current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let settings = service.get_settings().await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// PUT /settings
pub async fn update_profile(
    service: web::Data<SettingsService>,
    current: CurrentUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let settings = service.update_profile(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// PUT /settings/rates
pub async fn update_rates(
    service: web::Data<SettingsService>,
    current: CurrentUser,
    payload: web::Json<UpdateRatesRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let settings = service.update_rates(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// Configure settings routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(get_settings))
            .route("", web::put().to(update_profile))
            .route("/rates", web::put().to(update_rates)),
    );
}
