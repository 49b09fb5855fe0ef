pub mod line_item;
pub mod payment;
pub mod sale;

pub use line_item::{LineItem, LineItemDetail};
pub use payment::{Payment, PaymentMethod, RecordPaymentRequest};
pub use sale::{
    AddLineItemRequest, AnnulSaleRequest, OpenSaleRequest, PaymentKind, Sale, SaleStatus,
    UpdateNotesRequest,
};

use rust_decimal::Decimal;
use serde::Serialize;

/// Sale with its line items, payments and derived balances
#[derive(Debug, Clone, Serialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub line_items: Vec<LineItemDetail>,
    pub payments: Vec<Payment>,
    pub paid_total: Decimal,
    pub outstanding: Decimal,
}
