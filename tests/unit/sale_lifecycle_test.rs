// Scenario tests for the sale status lifecycle.

use caja::modules::installments::models::Frequency;
use caja::modules::sales::models::{PaymentKind, Sale, SaleStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

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
fn test_cash_sale_settled_by_two_payments() {
    // $60 + $40 on a $100 sale settles it
    let mut sale = draft_sale(dec!(100.00));
    sale.finalize_cash(2).unwrap();
    assert_eq!(sale.status, SaleStatus::AwaitingPayment);

    let after_first = dec!(60.00);
    assert!(!sale.settles(after_first));

    let after_second = after_first + dec!(40.00);
    assert!(sale.settles(after_second));

    sale.mark_paid(after_second).unwrap();
    assert_eq!(sale.status, SaleStatus::Paid);
}

#[test]
fn test_settlement_tolerance_absorbs_cent_rounding() {
    let mut sale = draft_sale(dec!(100.00));
    sale.finalize_cash(1).unwrap();

    // One cent short still settles; two cents does not
    assert!(sale.mark_paid(dec!(99.98)).is_err());
    sale.mark_paid(dec!(99.99)).unwrap();
    assert_eq!(sale.status, SaleStatus::Paid);
}

#[test]
fn test_credit_sale_reaches_paid_after_installments() {
    let mut sale = draft_sale(dec!(100.00));
    sale.finalize_credit(1, 3, Frequency::Monthly, dec!(10.00))
        .unwrap();
    assert_eq!(sale.status, SaleStatus::Credit);

    // Down payment plus all installments (including interest) covers the
    // total, so the sale settles
    let paid = dec!(10.00) + dec!(95.40);
    sale.mark_paid(paid).unwrap();
    assert_eq!(sale.status, SaleStatus::Paid);
}

#[test]
fn test_return_flow_from_paid() {
    let mut sale = draft_sale(dec!(40.00));
    sale.finalize_cash(1).unwrap();
    sale.mark_paid(dec!(40.00)).unwrap();

    sale.register_return().unwrap();
    assert_eq!(sale.status, SaleStatus::HasReturn);

    // HasReturn never reverts and never settles again
    assert!(sale.mark_paid(dec!(100.00)).is_err());
    assert!(sale.annul("no", 1, sale.sold_at).is_err());
}

#[test]
fn test_annulment_is_terminal() {
    let mut sale = draft_sale(dec!(40.00));
    sale.finalize_cash(1).unwrap();
    sale.annul("customer cancelled", 2, sale.sold_at).unwrap();

    assert_eq!(sale.status, SaleStatus::Annulled);
    assert_eq!(sale.annulment_motive.as_deref(), Some("customer cancelled"));
    assert!(sale.mark_paid(dec!(40.00)).is_err());
    assert!(sale.register_return().is_err());
}
