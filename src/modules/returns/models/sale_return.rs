use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::modules::sales::models::PaymentMethod;

/// Recorded return/exchange against a sale. Every reconciliation writes one
/// of these for audit, whatever the monetary outcome.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SaleReturn {
    pub id: i64,
    pub sale_id: i64,
    pub returned_at: NaiveDateTime,
    pub motive: Option<String>,
    /// Sum of returned quantities at their original unit prices
    pub refund_total: Decimal,
    /// Sum of exchange items at their current prices
    pub charge_total: Decimal,
    /// charge_total - refund_total
    pub balance: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReturnedItem {
    pub id: i64,
    pub return_id: i64,
    pub line_item_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    /// Original unit price snapshot from the sale line
    pub unit_price: Decimal,
    /// Whether the units went back into inventory
    pub restocked: bool,
}

/// Return with its item list
#[derive(Debug, Clone, Serialize)]
pub struct ReturnDetail {
    #[serde(flatten)]
    pub record: SaleReturn,
    pub items: Vec<ReturnedItem>,
}

/// Where the money goes when the store owes the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefundChannel {
    /// Record the refund as an expense under the dedicated category
    #[default]
    Expense,
    /// Issue store credit instead of paying money out
    CreditNote,
}

// Request payloads

fn default_restock() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ReturnItemInput {
    pub line_item_id: i64,
    pub quantity: i32,
    #[serde(default = "default_restock")]
    pub restock: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeItemInput {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateReturnRequest {
    pub motive: Option<String>,
    pub items: Vec<ReturnItemInput>,
    /// Exchange items added to the sale at their current price
    #[serde(default)]
    pub new_items: Vec<ExchangeItemInput>,
    #[serde(default)]
    pub refund_channel: RefundChannel,
    /// Method used when the customer pays a positive balance
    pub payment_method: Option<PaymentMethod>,
}

/// Result of a processed return
#[derive(Debug, Clone, Serialize)]
pub struct ReturnOutcome {
    #[serde(flatten)]
    pub detail: ReturnDetail,
    /// Payment recorded when the customer owed the difference
    pub payment_id: Option<i64>,
    /// Expense recorded when the store refunded money
    pub expense_id: Option<i64>,
    /// Credit note issued when the customer chose store credit
    pub credit_note_id: Option<i64>,
}
