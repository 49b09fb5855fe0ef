use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::CurrentUser;
use crate::modules::expenses::models::{CreateCategoryRequest, CreateExpenseRequest};
use crate::modules::expenses::services::ExpenseService;

/// GET /expense-categories
pub async fn list_categories(
    service: web::Data<ExpenseService>,
    _current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let categories = service.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// POST /expense-categories
pub async fn create_category(
    service: web::Data<ExpenseService>,
    current: CurrentUser,
    payload: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    let category = service.create_category(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(category))
}

/// DELETE /expense-categories/{id}
pub async fn delete_category(
    service: web::Data<ExpenseService>,
    current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    service.delete_category(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /expenses
pub async fn list_expenses(
    service: web::Data<ExpenseService>,
    _current: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let expenses = service.list_expenses().await?;
    Ok(HttpResponse::Ok().json(expenses))
}

/// POST /expenses
pub async fn create_expense(
    service: web::Data<ExpenseService>,
    current: CurrentUser,
    payload: web::Json<CreateExpenseRequest>,
) -> Result<HttpResponse, AppError> {
    let expense = service
        .create_expense(payload.into_inner(), &current)
        .await?;
    Ok(HttpResponse::Created().json(expense))
}

/// DELETE /expenses/{id}
pub async fn delete_expense(
    service: web::Data<ExpenseService>,
    current: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    current.require_admin()?;

    service.delete_expense(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure expense routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/expense-categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
    cfg.service(
        web::scope("/expenses")
            .route("", web::get().to(list_expenses))
            .route("", web::post().to(create_expense))
            .route("/{id}", web::delete().to(delete_expense)),
    );
}
