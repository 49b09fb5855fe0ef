pub mod installment_service;
pub mod plan_calculator;

pub use installment_service::InstallmentService;
pub use plan_calculator::{PlanCalculator, PlanInput};
