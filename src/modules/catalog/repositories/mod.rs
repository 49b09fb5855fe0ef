pub mod product_repository;
pub mod product_type_repository;

pub use product_repository::ProductRepository;
pub use product_type_repository::ProductTypeRepository;
