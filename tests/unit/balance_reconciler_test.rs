// Property-based tests for return/exchange balance reconciliation.

use caja::modules::returns::services::{reconcile, AddedLine, ReturnedLine, Settlement};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_partial_refund_with_no_exchange() {
    // Return 1 of 2 sold units at $20, nothing in exchange:
    // refund = $20, balance = -$20 -> the store owes the customer
    let rec = reconcile(
        &[ReturnedLine {
            quantity: 1,
            unit_price: dec!(20.00),
        }],
        &[],
    );

    assert_eq!(rec.refund_total, dec!(20.00));
    assert_eq!(rec.balance, dec!(-20.00));
    assert_eq!(rec.settlement(), Settlement::StoreOwes(dec!(20.00)));
}

#[test]
fn test_customer_owes_on_pricier_exchange() {
    let rec = reconcile(
        &[ReturnedLine {
            quantity: 1,
            unit_price: dec!(10.00),
        }],
        &[AddedLine {
            quantity: 2,
            unit_price: dec!(12.50),
        }],
    );

    assert_eq!(rec.charge_total, dec!(25.00));
    assert_eq!(rec.settlement(), Settlement::CustomerOwes(dec!(15.00)));
}

fn cents() -> impl Strategy<Value = Decimal> {
    (1u64..100_000u64).prop_map(|c| Decimal::from(c) / Decimal::from(100))
}

proptest! {
    /// balance is always charge minus refund, and the settlement
    /// classification always matches the balance sign
    #[test]
    fn prop_balance_consistency(
        returned in proptest::collection::vec((1i32..20i32, cents()), 0..6),
        added in proptest::collection::vec((1i32..20i32, cents()), 0..6),
    ) {
        let returned: Vec<ReturnedLine> = returned
            .into_iter()
            .map(|(quantity, unit_price)| ReturnedLine { quantity, unit_price })
            .collect();
        let added: Vec<AddedLine> = added
            .into_iter()
            .map(|(quantity, unit_price)| AddedLine { quantity, unit_price })
            .collect();

        let rec = reconcile(&returned, &added);

        prop_assert_eq!(rec.balance, rec.charge_total - rec.refund_total);

        match rec.settlement() {
            Settlement::CustomerOwes(amount) => {
                prop_assert!(rec.balance > Decimal::ZERO);
                prop_assert_eq!(amount, rec.balance);
            }
            Settlement::StoreOwes(amount) => {
                prop_assert!(rec.balance < Decimal::ZERO);
                prop_assert_eq!(amount, -rec.balance);
            }
            Settlement::Even => prop_assert_eq!(rec.balance, Decimal::ZERO),
        }
    }

    /// Re-deriving the reconciliation from the same stored lines always
    /// reproduces the recorded amounts
    #[test]
    fn prop_rederivation_matches(
        returned in proptest::collection::vec((1i32..20i32, cents()), 1..6),
    ) {
        let lines: Vec<ReturnedLine> = returned
            .into_iter()
            .map(|(quantity, unit_price)| ReturnedLine { quantity, unit_price })
            .collect();

        let first = reconcile(&lines, &[]);
        let second = reconcile(&lines, &[]);

        prop_assert_eq!(first, second);
        let manual: Decimal = lines
            .iter()
            .map(|l| Decimal::from(l.quantity) * l.unit_price)
            .sum();
        prop_assert_eq!(first.refund_total, manual);
    }
}
