use std::sync::Arc;

use actix_cors::Cors;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caja::config::Config;
use caja::middleware::{ErrorHandler, RequestId, SessionGuard};
use caja::modules::catalog::controllers::{product_controller, product_type_controller};
use caja::modules::catalog::repositories::{ProductRepository, ProductTypeRepository};
use caja::modules::catalog::services::CatalogService;
use caja::modules::customers::controllers::customer_controller;
use caja::modules::customers::repositories::CustomerRepository;
use caja::modules::customers::services::CustomerService;
use caja::modules::expenses::controllers::expense_controller;
use caja::modules::expenses::repositories::ExpenseRepository;
use caja::modules::expenses::services::ExpenseService;
use caja::modules::installments::controllers::installment_controller;
use caja::modules::installments::repositories::PlanRepository;
use caja::modules::installments::services::InstallmentService;
use caja::modules::receipts::controllers::receipt_controller;
use caja::modules::receipts::services::{HtmlFileRenderer, ReceiptService};
use caja::modules::returns::controllers::return_controller;
use caja::modules::returns::repositories::{CreditNoteRepository, ReturnRepository};
use caja::modules::returns::services::ReturnService;
use caja::modules::sales::controllers::{payment_controller, sale_controller};
use caja::modules::sales::repositories::{PaymentRepository, SaleRepository};
use caja::modules::sales::services::{PaymentService, SaleService};
use caja::modules::settings::controllers::settings_controller;
use caja::modules::settings::repositories::SettingsRepository;
use caja::modules::settings::services::SettingsService;
use caja::modules::users::controllers::{auth_controller, user_controller};
use caja::modules::users::repositories::UserRepository;
use caja::modules::users::services::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caja=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Caja store management backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool and apply migrations
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to apply migrations");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Services
    let user_service = UserService::new(UserRepository::new(db_pool.clone()));

    // Create the bootstrap administrator when configured via environment
    if let Some(bootstrap) = config.admin_bootstrap() {
        user_service
            .ensure_bootstrap_admin(&bootstrap)
            .await
            .expect("Failed to create bootstrap administrator");
    }

    let user_service = web::Data::new(user_service);

    let settings_service = web::Data::new(SettingsService::new(SettingsRepository::new(
        db_pool.clone(),
    )));

    let catalog_service = web::Data::new(CatalogService::new(
        ProductRepository::new(db_pool.clone()),
        ProductTypeRepository::new(db_pool.clone()),
    ));

    let customer_service = web::Data::new(CustomerService::new(CustomerRepository::new(
        db_pool.clone(),
    )));

    let sale_service = web::Data::new(SaleService::new(
        db_pool.clone(),
        SaleRepository::new(db_pool.clone()),
        PaymentRepository::new(db_pool.clone()),
        ProductRepository::new(db_pool.clone()),
        CustomerRepository::new(db_pool.clone()),
    ));

    let payment_service = web::Data::new(PaymentService::new(
        db_pool.clone(),
        SaleRepository::new(db_pool.clone()),
        PaymentRepository::new(db_pool.clone()),
    ));

    let installment_service = web::Data::new(InstallmentService::new(
        db_pool.clone(),
        SaleRepository::new(db_pool.clone()),
        PaymentRepository::new(db_pool.clone()),
        PlanRepository::new(db_pool.clone()),
        SettingsRepository::new(db_pool.clone()),
    ));

    let return_service = web::Data::new(ReturnService::new(
        db_pool.clone(),
        SaleRepository::new(db_pool.clone()),
        PaymentRepository::new(db_pool.clone()),
        ProductRepository::new(db_pool.clone()),
        ReturnRepository::new(db_pool.clone()),
        CreditNoteRepository::new(db_pool.clone()),
        ExpenseRepository::new(db_pool.clone()),
        SettingsRepository::new(db_pool.clone()),
    ));

    let expense_service = web::Data::new(ExpenseService::new(ExpenseRepository::new(
        db_pool.clone(),
    )));

    let receipt_service = web::Data::new(ReceiptService::new(
        SaleRepository::new(db_pool.clone()),
        PaymentRepository::new(db_pool.clone()),
        CustomerRepository::new(db_pool.clone()),
        SettingsRepository::new(db_pool.clone()),
        Arc::new(HtmlFileRenderer::new(config.app.artifact_dir.clone())),
    ));

    let session_key = Key::from(config.security.session_secret.as_bytes());

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(user_service.clone())
            .app_data(settings_service.clone())
            .app_data(catalog_service.clone())
            .app_data(customer_service.clone())
            .app_data(sale_service.clone())
            .app_data(payment_service.clone())
            .app_data(installment_service.clone())
            .app_data(return_service.clone())
            .app_data(expense_service.clone())
            .app_data(receipt_service.clone())
            // Middleware registered last runs first: request id and logging,
            // then CORS, then the session store, then the login guard
            .wrap(ErrorHandler)
            .wrap(SessionGuard)
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .configure(auth_controller::configure)
            .configure(user_controller::configure)
            .configure(settings_controller::configure)
            .configure(product_type_controller::configure)
            .configure(product_controller::configure)
            .configure(customer_controller::configure)
            .configure(sale_controller::configure)
            .configure(payment_controller::configure)
            .configure(installment_controller::configure)
            .configure(return_controller::configure)
            .configure(expense_controller::configure)
            .configure(receipt_controller::configure)
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "caja"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Caja store management backend",
        "version": "0.1.0",
        "status": "running"
    }))
}
