pub mod payment_controller;
pub mod sale_controller;
