// Property-based tests for the installment plan calculator.

use caja::modules::installments::models::Frequency;
use caja::modules::installments::services::{PlanCalculator, PlanInput};
use caja::modules::settings::models::InterestRates;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn monthly_rates(pct: Decimal) -> InterestRates {
    InterestRates {
        daily_pct: Decimal::ZERO,
        weekly_pct: Decimal::ZERO,
        monthly_pct: pct,
    }
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn test_three_monthly_installments_at_two_percent() {
    // $100, 0 down, 3 monthly installments at 2%/month:
    // interest = 100 x 0.02 x 3 = $6, installments 35.33 / 35.33 / 35.34
    let input = PlanInput {
        total: dec!(100.00),
        down_payment: dec!(0),
        count: 3,
        frequency: Frequency::Monthly,
        start: start_date(),
    };

    let lines = PlanCalculator::build_plan(&input, &monthly_rates(dec!(2))).unwrap();

    let interest: Decimal = lines.iter().map(|l| l.interest).sum();
    let collected: Decimal = lines.iter().map(|l| l.total_due).sum();

    assert_eq!(interest, dec!(6.00));
    assert_eq!(lines[0].total_due, dec!(35.33));
    assert_eq!(lines[2].total_due, dec!(35.34));
    assert_eq!(collected, dec!(106.00));
}

#[test]
fn test_empty_plan_for_zero_installments() {
    let input = PlanInput {
        total: dec!(250.00),
        down_payment: dec!(50.00),
        count: 0,
        frequency: Frequency::Weekly,
        start: start_date(),
    };

    let lines = PlanCalculator::build_plan(&input, &monthly_rates(dec!(2))).unwrap();
    assert!(lines.is_empty());
}

proptest! {
    /// Principal portions always sum exactly to the financed amount
    /// (total minus down payment); the last entry absorbs rounding.
    #[test]
    fn prop_principals_sum_to_financed(
        total_cents in 2_000u64..5_000_000u64,
        down_pct in 0u64..50u64,
        count in 1u32..24u32,
        rate_tenths in 0u64..200u64,
    ) {
        let total = Decimal::from(total_cents) / Decimal::from(100);
        let down = (total * Decimal::from(down_pct) / Decimal::from(100)).round_dp(2);
        let rates = monthly_rates(Decimal::from(rate_tenths) / Decimal::from(10));

        let input = PlanInput {
            total,
            down_payment: down,
            count,
            frequency: Frequency::Monthly,
            start: start_date(),
        };

        let lines = PlanCalculator::build_plan(&input, &rates).unwrap();
        prop_assert_eq!(lines.len(), count as usize);

        let principal_sum: Decimal = lines.iter().map(|l| l.principal).sum();
        prop_assert_eq!(principal_sum, total - down, "principals must sum to the financed amount");
    }

    /// Entry totals always sum to financed principal plus total interest
    #[test]
    fn prop_totals_sum_to_financed_plus_interest(
        total_cents in 2_000u64..5_000_000u64,
        count in 1u32..24u32,
        rate_tenths in 0u64..200u64,
    ) {
        let total = Decimal::from(total_cents) / Decimal::from(100);
        let rate = Decimal::from(rate_tenths) / Decimal::from(10);
        let rates = monthly_rates(rate);

        let input = PlanInput {
            total,
            down_payment: Decimal::ZERO,
            count,
            frequency: Frequency::Monthly,
            start: start_date(),
        };

        let lines = PlanCalculator::build_plan(&input, &rates).unwrap();

        let expected_interest = (total * rate / Decimal::from(100) * Decimal::from(count))
            .round_dp(2);
        let interest_sum: Decimal = lines.iter().map(|l| l.interest).sum();
        let due_sum: Decimal = lines.iter().map(|l| l.total_due).sum();

        prop_assert_eq!(interest_sum, expected_interest);
        prop_assert_eq!(due_sum, total + expected_interest);
    }

    /// Due dates strictly advance, one period per installment
    #[test]
    fn prop_due_dates_advance(count in 1u32..24u32) {
        let input = PlanInput {
            total: dec!(120.00),
            down_payment: Decimal::ZERO,
            count,
            frequency: Frequency::Weekly,
            start: start_date(),
        };

        let lines = PlanCalculator::build_plan(&input, &monthly_rates(dec!(0))).unwrap();

        for pair in lines.windows(2) {
            prop_assert!(pair[0].due_date < pair[1].due_date);
        }
        prop_assert_eq!(lines[0].due_date, start_date() + chrono::Duration::weeks(1));
    }
}
