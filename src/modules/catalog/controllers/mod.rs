pub mod product_controller;
pub mod product_type_controller;
