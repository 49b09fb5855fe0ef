pub mod plan_entry;

pub use plan_entry::{EntryStatus, Frequency, PlanEntry, PlanLine};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::modules::sales::models::PaymentMethod;

/// Parameters for finalizing a draft as a credit sale
#[derive(Debug, Deserialize)]
pub struct FinalizeCreditRequest {
    pub installment_count: u32,
    pub frequency: Frequency,
    #[serde(default)]
    pub down_payment: Decimal,
    pub down_payment_method: Option<PaymentMethod>,
    pub down_payment_proof: Option<String>,
}

/// Parameters for paying one installment
#[derive(Debug, Deserialize)]
pub struct PayInstallmentRequest {
    pub method: PaymentMethod,
    pub proof_path: Option<String>,
}
