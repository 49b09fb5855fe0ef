pub mod installment_controller;
