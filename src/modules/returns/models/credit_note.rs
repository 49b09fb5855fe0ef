use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// Credit note status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteStatus {
    Active,
    Exhausted,
}

impl NoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Exhausted => "exhausted",
        }
    }
}

impl TryFrom<String> for NoteStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(Self::Active),
            "exhausted" => Ok(Self::Exhausted),
            _ => Err(format!("Invalid credit note status: {}", value)),
        }
    }
}

/// Store credit issued to a customer, usually from a return refund.
/// The balance is spent against later sales until exhausted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CreditNote {
    pub id: i64,
    pub customer_id: i64,
    pub return_id: Option<i64>,
    pub initial_amount: Decimal,
    pub remaining_balance: Decimal,
    #[sqlx(try_from = "String")]
    pub status: NoteStatus,
    pub created_at: NaiveDateTime,
}

impl CreditNote {
    pub fn is_active(&self) -> bool {
        self.status == NoteStatus::Active
    }

    /// Spend part of the balance. Exhausts the note when it reaches zero.
    pub fn redeem(&mut self, amount: Decimal) -> Result<()> {
        if !self.is_active() {
            return Err(AppError::validation("This credit note is exhausted"));
        }

        if amount <= Decimal::ZERO {
            return Err(AppError::validation("Redeemed amount must be positive"));
        }

        if amount > self.remaining_balance {
            return Err(AppError::validation(format!(
                "The credit note only has {} remaining",
                self.remaining_balance
            )));
        }

        self.remaining_balance -= amount;
        if self.remaining_balance == Decimal::ZERO {
            self.status = NoteStatus::Exhausted;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct RedeemCreditNoteRequest {
    pub sale_id: i64,
    /// Defaults to the lower of the note balance and the sale's outstanding
    /// amount
    pub amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn note(remaining: Decimal) -> CreditNote {
        CreditNote {
            id: 1,
            customer_id: 1,
            return_id: Some(1),
            initial_amount: Decimal::new(5000, 2),
            remaining_balance: remaining,
            status: NoteStatus::Active,
            created_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_redeem_reduces_balance() {
        let mut note = note(Decimal::new(5000, 2));

        note.redeem(Decimal::new(2000, 2)).unwrap();
        assert_eq!(note.remaining_balance, Decimal::new(3000, 2));
        assert_eq!(note.status, NoteStatus::Active);
    }

    #[test]
    fn test_redeem_to_zero_exhausts() {
        let mut note = note(Decimal::new(5000, 2));

        note.redeem(Decimal::new(5000, 2)).unwrap();
        assert_eq!(note.remaining_balance, Decimal::ZERO);
        assert_eq!(note.status, NoteStatus::Exhausted);

        // No further redemptions
        assert!(note.redeem(Decimal::new(100, 2)).is_err());
    }

    #[test]
    fn test_redeem_over_balance_rejected() {
        let mut note = note(Decimal::new(1000, 2));
        assert!(note.redeem(Decimal::new(1001, 2)).is_err());
        assert!(note.redeem(Decimal::ZERO).is_err());
    }
}
