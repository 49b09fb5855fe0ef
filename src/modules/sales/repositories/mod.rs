pub mod payment_repository;
pub mod sale_repository;

pub use payment_repository::PaymentRepository;
pub use sale_repository::SaleRepository;
