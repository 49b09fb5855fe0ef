// Balance reconciliation for returns and exchanges.
//
// Pure arithmetic: given what comes back (at its original price) and what
// goes out in exchange (at today's price), derive who owes whom. The caller
// applies the outcome (payment, expense or credit note) and the stock moves.

use rust_decimal::Decimal;
use serde::Serialize;

/// A returned quantity at the unit price it was originally sold for
#[derive(Debug, Clone, Copy)]
pub struct ReturnedLine {
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// An exchange quantity at the product's current price
#[derive(Debug, Clone, Copy)]
pub struct AddedLine {
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Who owes whom after reconciling a return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Settlement {
    /// The exchange items cost more than the refund; the customer pays
    CustomerOwes(Decimal),
    /// The refund exceeds the new charge; the store pays or credits
    StoreOwes(Decimal),
    /// No monetary movement; inventory and line items only
    Even,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub refund_total: Decimal,
    pub charge_total: Decimal,
    /// charge_total - refund_total
    pub balance: Decimal,
}

impl Reconciliation {
    pub fn settlement(&self) -> Settlement {
        if self.balance > Decimal::ZERO {
            Settlement::CustomerOwes(self.balance)
        } else if self.balance < Decimal::ZERO {
            Settlement::StoreOwes(-self.balance)
        } else {
            Settlement::Even
        }
    }
}

/// Compute the net monetary delta between returned and newly added items
pub fn reconcile(returned: &[ReturnedLine], added: &[AddedLine]) -> Reconciliation {
    let refund_total: Decimal = returned
        .iter()
        .map(|line| Decimal::from(line.quantity) * line.unit_price)
        .sum();

    let charge_total: Decimal = added
        .iter()
        .map(|line| Decimal::from(line.quantity) * line.unit_price)
        .sum();

    Reconciliation {
        refund_total,
        charge_total,
        balance: charge_total - refund_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_refund() {
        // 1 of 2 units at $20 returned, nothing in exchange
        let rec = reconcile(
            &[ReturnedLine {
                quantity: 1,
                unit_price: Decimal::new(2000, 2),
            }],
            &[],
        );

        assert_eq!(rec.refund_total, Decimal::new(2000, 2));
        assert_eq!(rec.charge_total, Decimal::ZERO);
        assert_eq!(rec.balance, Decimal::new(-2000, 2));
        assert_eq!(rec.settlement(), Settlement::StoreOwes(Decimal::new(2000, 2)));
    }

    #[test]
    fn test_exchange_for_dearer_item() {
        let rec = reconcile(
            &[ReturnedLine {
                quantity: 1,
                unit_price: Decimal::new(2000, 2),
            }],
            &[AddedLine {
                quantity: 1,
                unit_price: Decimal::new(3500, 2),
            }],
        );

        assert_eq!(rec.balance, Decimal::new(1500, 2));
        assert_eq!(
            rec.settlement(),
            Settlement::CustomerOwes(Decimal::new(1500, 2))
        );
    }

    #[test]
    fn test_even_swap() {
        let rec = reconcile(
            &[ReturnedLine {
                quantity: 2,
                unit_price: Decimal::new(1500, 2),
            }],
            &[AddedLine {
                quantity: 1,
                unit_price: Decimal::new(3000, 2),
            }],
        );

        assert_eq!(rec.balance, Decimal::ZERO);
        assert_eq!(rec.settlement(), Settlement::Even);
    }

    #[test]
    fn test_empty_inputs() {
        let rec = reconcile(&[], &[]);
        assert_eq!(rec.refund_total, Decimal::ZERO);
        assert_eq!(rec.charge_total, Decimal::ZERO);
        assert_eq!(rec.settlement(), Settlement::Even);
    }
}
