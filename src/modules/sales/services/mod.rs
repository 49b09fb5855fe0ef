pub mod payment_service;
pub mod sale_service;

pub use payment_service::PaymentService;
pub use sale_service::SaleService;
