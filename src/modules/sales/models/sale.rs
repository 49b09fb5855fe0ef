// Sale aggregate and its status lifecycle.
//
// A sale starts as a draft cart, is finalized either for cash payment or on
// credit, and settles once recorded payments cover the total. Annulment is
// terminal and only possible before settlement; returns move a settled sale
// to HasReturn and never revert.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{money, AppError, Result};
use crate::modules::installments::models::Frequency;

/// Sale status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Open cart; line items can still change
    Draft,
    /// Finalized cash sale waiting for payment
    AwaitingPayment,
    /// Finalized credit sale with an installment plan
    Credit,
    /// Fully paid
    Paid,
    /// Cancelled before settlement; stock restored. Terminal.
    Annulled,
    /// A return was reconciled against the sale. Does not revert.
    HasReturn,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::AwaitingPayment => "awaiting_payment",
            Self::Credit => "credit",
            Self::Paid => "paid",
            Self::Annulled => "annulled",
            Self::HasReturn => "has_return",
        }
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for SaleStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "draft" => Ok(Self::Draft),
            "awaiting_payment" => Ok(Self::AwaitingPayment),
            "credit" => Ok(Self::Credit),
            "paid" => Ok(Self::Paid),
            "annulled" => Ok(Self::Annulled),
            "has_return" => Ok(Self::HasReturn),
            _ => Err(format!("Invalid sale status: {}", value)),
        }
    }
}

/// How the sale is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Cash,
    Credit,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Credit => "credit",
        }
    }
}

impl TryFrom<String> for PaymentKind {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "cash" => Ok(Self::Cash),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Invalid payment kind: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sale {
    pub id: i64,
    pub customer_id: i64,
    pub sold_at: NaiveDateTime,
    /// Always equals the sum of active line item subtotals; recomputed after
    /// every cart edit and every reconciled return
    pub total_amount: Decimal,
    #[sqlx(try_from = "String")]
    pub status: SaleStatus,
    pub notes: Option<String>,
    #[sqlx(try_from = "String")]
    pub payment_kind: PaymentKind,
    pub installment_count: Option<i32>,
    pub installment_frequency: Option<String>,
    pub down_payment: Option<Decimal>,
    pub annulled_by: Option<i64>,
    pub annulment_motive: Option<String>,
    pub annulled_at: Option<NaiveDateTime>,
}

impl Sale {
    /// Line items can only change while the sale is a draft
    pub fn is_editable(&self) -> bool {
        self.status == SaleStatus::Draft
    }

    /// Whether `paid_total` settles this sale within the cent tolerance
    pub fn settles(&self, paid_total: Decimal) -> bool {
        money::is_settled(paid_total, self.total_amount)
    }

    /// Draft -> AwaitingPayment
    pub fn finalize_cash(&mut self, line_item_count: usize) -> Result<()> {
        self.ensure_finalizable(line_item_count)?;

        self.status = SaleStatus::AwaitingPayment;
        self.payment_kind = PaymentKind::Cash;

        Ok(())
    }

    /// Draft -> Credit, recording the plan parameters
    pub fn finalize_credit(
        &mut self,
        line_item_count: usize,
        installment_count: u32,
        frequency: Frequency,
        down_payment: Decimal,
    ) -> Result<()> {
        self.ensure_finalizable(line_item_count)?;

        if installment_count == 0 {
            return Err(AppError::validation(
                "A credit sale needs at least one installment; use a cash sale otherwise",
            ));
        }

        if down_payment < Decimal::ZERO {
            return Err(AppError::validation("Down payment cannot be negative"));
        }

        if down_payment >= self.total_amount {
            return Err(AppError::validation(
                "Down payment must be below the sale total; use a cash sale otherwise",
            ));
        }

        self.status = SaleStatus::Credit;
        self.payment_kind = PaymentKind::Credit;
        self.installment_count = Some(installment_count as i32);
        self.installment_frequency = Some(frequency.as_str().to_string());
        self.down_payment = Some(down_payment);

        Ok(())
    }

    /// AwaitingPayment | Credit -> Paid, once payments cover the total
    pub fn mark_paid(&mut self, paid_total: Decimal) -> Result<()> {
        match self.status {
            SaleStatus::AwaitingPayment | SaleStatus::Credit => {}
            other => {
                return Err(AppError::validation(format!(
                    "A {} sale cannot be marked as paid",
                    other
                )))
            }
        }

        if !self.settles(paid_total) {
            return Err(AppError::validation(format!(
                "Recorded payments ({}) do not cover the sale total ({})",
                paid_total, self.total_amount
            )));
        }

        self.status = SaleStatus::Paid;

        Ok(())
    }

    /// Any pre-Paid state -> Annulled. Terminal.
    pub fn annul(&mut self, motive: &str, user_id: i64, now: NaiveDateTime) -> Result<()> {
        if motive.trim().is_empty() {
            return Err(AppError::validation("Annulment requires a motive"));
        }

        match self.status {
            SaleStatus::Draft | SaleStatus::AwaitingPayment | SaleStatus::Credit => {}
            other => {
                return Err(AppError::validation(format!(
                    "A {} sale cannot be annulled",
                    other
                )))
            }
        }

        self.status = SaleStatus::Annulled;
        self.annulled_by = Some(user_id);
        self.annulment_motive = Some(motive.trim().to_string());
        self.annulled_at = Some(now);

        Ok(())
    }

    /// Paid | Credit -> HasReturn. Further returns keep the status.
    pub fn register_return(&mut self) -> Result<()> {
        match self.status {
            SaleStatus::Paid | SaleStatus::Credit | SaleStatus::HasReturn => {
                self.status = SaleStatus::HasReturn;
                Ok(())
            }
            other => Err(AppError::validation(format!(
                "Returns are not accepted on a {} sale",
                other
            ))),
        }
    }

    fn ensure_finalizable(&self, line_item_count: usize) -> Result<()> {
        if self.status != SaleStatus::Draft {
            return Err(AppError::validation(format!(
                "A {} sale is already finalized",
                self.status
            )));
        }

        if line_item_count == 0 {
            return Err(AppError::validation(
                "A sale without products cannot be finalized",
            ));
        }

        Ok(())
    }
}

// Request payloads

#[derive(Debug, Deserialize)]
pub struct OpenSaleRequest {
    pub customer_id: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddLineItemRequest {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnnulSaleRequest {
    pub motive: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft_sale(total: Decimal) -> Sale {
        Sale {
            id: 1,
            customer_id: 1,
            sold_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            total_amount: total,
            status: SaleStatus::Draft,
            notes: None,
            payment_kind: PaymentKind::Cash,
            installment_count: None,
            installment_frequency: None,
            down_payment: None,
            annulled_by: None,
            annulment_motive: None,
            annulled_at: None,
        }
    }

    #[test]
    fn test_finalize_cash_requires_items() {
        let mut sale = draft_sale(Decimal::new(10000, 2));

        assert!(sale.finalize_cash(0).is_err());
        assert!(sale.finalize_cash(2).is_ok());
        assert_eq!(sale.status, SaleStatus::AwaitingPayment);

        // Already finalized
        assert!(sale.finalize_cash(2).is_err());
    }

    #[test]
    fn test_finalize_credit_validates_parameters() {
        let total = Decimal::new(10000, 2);

        let mut sale = draft_sale(total);
        assert!(sale
            .finalize_credit(1, 0, Frequency::Monthly, Decimal::ZERO)
            .is_err());

        let mut sale = draft_sale(total);
        assert!(sale
            .finalize_credit(1, 3, Frequency::Monthly, total)
            .is_err());

        let mut sale = draft_sale(total);
        assert!(sale
            .finalize_credit(1, 3, Frequency::Monthly, Decimal::new(2000, 2))
            .is_ok());
        assert_eq!(sale.status, SaleStatus::Credit);
        assert_eq!(sale.installment_count, Some(3));
        assert_eq!(sale.installment_frequency.as_deref(), Some("monthly"));
    }

    #[test]
    fn test_mark_paid_requires_settlement() {
        let mut sale = draft_sale(Decimal::new(10000, 2));
        sale.finalize_cash(1).unwrap();

        // 60 + 40 on a 100 total settles the sale
        assert!(sale.mark_paid(Decimal::new(6000, 2)).is_err());
        assert!(sale.mark_paid(Decimal::new(10000, 2)).is_ok());
        assert_eq!(sale.status, SaleStatus::Paid);
    }

    #[test]
    fn test_mark_paid_rejected_on_draft() {
        let mut sale = draft_sale(Decimal::new(10000, 2));
        assert!(sale.mark_paid(Decimal::new(10000, 2)).is_err());
    }

    #[test]
    fn test_annul_requires_motive_and_pre_paid_state() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        let mut sale = draft_sale(Decimal::new(5000, 2));
        assert!(sale.annul("", 1, now).is_err());
        assert!(sale.annul("wrong customer", 1, now).is_ok());
        assert_eq!(sale.status, SaleStatus::Annulled);
        assert_eq!(sale.annulled_by, Some(1));

        // Terminal: cannot annul twice
        assert!(sale.annul("again", 1, now).is_err());

        // Paid sales cannot be annulled
        let mut sale = draft_sale(Decimal::new(5000, 2));
        sale.finalize_cash(1).unwrap();
        sale.mark_paid(Decimal::new(5000, 2)).unwrap();
        assert!(sale.annul("too late", 1, now).is_err());
    }

    #[test]
    fn test_register_return_transitions() {
        let mut sale = draft_sale(Decimal::new(5000, 2));
        assert!(sale.register_return().is_err());

        sale.finalize_cash(1).unwrap();
        assert!(sale.register_return().is_err());

        sale.mark_paid(Decimal::new(5000, 2)).unwrap();
        assert!(sale.register_return().is_ok());
        assert_eq!(sale.status, SaleStatus::HasReturn);

        // A second return keeps the status
        assert!(sale.register_return().is_ok());
        assert_eq!(sale.status, SaleStatus::HasReturn);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            SaleStatus::Draft,
            SaleStatus::AwaitingPayment,
            SaleStatus::Credit,
            SaleStatus::Paid,
            SaleStatus::Annulled,
            SaleStatus::HasReturn,
        ] {
            let parsed = SaleStatus::try_from(status.as_str().to_string()).unwrap();
            assert_eq!(parsed, status);
        }
        assert!(SaleStatus::try_from("pending".to_string()).is_err());
    }
}
