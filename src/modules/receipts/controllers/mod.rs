pub mod receipt_controller;
