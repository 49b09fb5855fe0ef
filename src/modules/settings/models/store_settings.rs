// Store-level configuration.
//
// A single row holds the store profile plus the business parameters that
// drive other modules (credit interest rates, return window). Services that
// need these values receive them explicitly; nothing reads this table as
// ambient global state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};
use crate::modules::installments::models::Frequency;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoreSettings {
    pub id: i64,
    pub store_name: String,
    pub logo_path: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    /// Flat interest percentage charged per day on daily plans
    pub daily_interest_pct: Decimal,
    /// Flat interest percentage charged per week on weekly plans
    pub weekly_interest_pct: Decimal,
    /// Flat interest percentage charged per month on monthly plans
    pub monthly_interest_pct: Decimal,
    /// Days after the sale during which returns are accepted
    pub return_window_days: i32,
}

impl StoreSettings {
    /// The interest rates as the value object consumed by the plan calculator
    pub fn interest_rates(&self) -> InterestRates {
        InterestRates {
            daily_pct: self.daily_interest_pct,
            weekly_pct: self.weekly_interest_pct,
            monthly_pct: self.monthly_interest_pct,
        }
    }
}

/// Configured flat interest percentages, one per installment frequency
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterestRates {
    pub daily_pct: Decimal,
    pub weekly_pct: Decimal,
    pub monthly_pct: Decimal,
}

impl InterestRates {
    /// The configured percentage for one period of the given frequency
    pub fn pct_for(&self, frequency: Frequency) -> Decimal {
        match frequency {
            Frequency::Daily => self.daily_pct,
            Frequency::Weekly => self.weekly_pct,
            Frequency::Monthly => self.monthly_pct,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (label, pct) in [
            ("daily", self.daily_pct),
            ("weekly", self.weekly_pct),
            ("monthly", self.monthly_pct),
        ] {
            if pct < Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "The {} interest rate cannot be negative",
                    label
                )));
            }
        }

        Ok(())
    }
}

// Request payloads

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub store_name: String,
    pub logo_path: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatesRequest {
    pub daily_interest_pct: Decimal,
    pub weekly_interest_pct: Decimal,
    pub monthly_interest_pct: Decimal,
    pub return_window_days: i32,
}
