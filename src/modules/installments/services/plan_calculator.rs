use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{money, AppError, Result};
use crate::modules::installments::models::{Frequency, PlanLine};
use crate::modules::settings::models::InterestRates;

/// Inputs for building an installment plan
#[derive(Debug, Clone)]
pub struct PlanInput {
    /// Sale total
    pub total: Decimal,
    /// Amount paid up front; the plan covers the rest
    pub down_payment: Decimal,
    /// Number of installments. Zero yields an empty plan: the sale settles
    /// as a single cash payment.
    pub count: u32,
    pub frequency: Frequency,
    /// Date the plan starts; the first installment falls one period later
    pub start: NaiveDate,
}

/// Calculator for installment payment plans.
///
/// Interest is flat per period, not amortizing:
/// total interest = financed principal x rate x count. Principal and interest
/// are split evenly across installments, with the last entry absorbing the
/// rounding residue so the sums match the financed amounts exactly.
pub struct PlanCalculator;

impl PlanCalculator {
    pub fn build_plan(input: &PlanInput, rates: &InterestRates) -> Result<Vec<PlanLine>> {
        money::validate_amount(input.total).map_err(AppError::validation)?;
        money::validate_amount(input.down_payment).map_err(AppError::validation)?;

        if input.down_payment > input.total {
            return Err(AppError::validation(
                "Down payment cannot exceed the sale total",
            ));
        }

        if input.count == 0 {
            return Ok(Vec::new());
        }

        let financed = input.total - input.down_payment;
        let count = Decimal::from(input.count);

        let rate_pct = rates.pct_for(input.frequency);
        let total_interest = money::round(financed * rate_pct / Decimal::ONE_HUNDRED * count);

        let base_principal = money::round(financed / count);
        let base_interest = money::round(total_interest / count);

        // A plan whose entries round down to nothing (or whose last entry
        // would absorb itself negative) is a data-entry mistake
        if base_principal <= Decimal::ZERO
            || financed - base_principal * (count - Decimal::ONE) <= Decimal::ZERO
        {
            return Err(AppError::validation(
                "The financed amount is too small for this many installments",
            ));
        }

        let mut lines = Vec::with_capacity(input.count as usize);
        let mut distributed_principal = Decimal::ZERO;
        let mut distributed_interest = Decimal::ZERO;

        for i in 1..=input.count {
            let last = i == input.count;

            // The last entry absorbs rounding so the plan sums exactly
            let principal = if last {
                financed - distributed_principal
            } else {
                base_principal
            };
            let interest = if last {
                total_interest - distributed_interest
            } else {
                base_interest
            };

            distributed_principal += principal;
            distributed_interest += interest;

            lines.push(PlanLine {
                sequence: i as i32,
                principal,
                interest,
                total_due: principal + interest,
                due_date: input.start + input.frequency.offset(i),
            });
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(daily: Decimal, weekly: Decimal, monthly: Decimal) -> InterestRates {
        InterestRates {
            daily_pct: daily,
            weekly_pct: weekly,
            monthly_pct: monthly,
        }
    }

    fn flat_two_pct_monthly() -> InterestRates {
        rates(Decimal::ZERO, Decimal::ZERO, Decimal::new(2, 0))
    }

    #[test]
    fn test_three_monthly_installments_at_two_pct() {
        // $100, no down payment, 3 monthly installments at 2%/month:
        // interest = 100 x 0.02 x 3 = $6, entries 35.33 / 35.33 / 35.34
        let input = PlanInput {
            total: Decimal::new(10000, 2),
            down_payment: Decimal::ZERO,
            count: 3,
            frequency: Frequency::Monthly,
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        let lines = PlanCalculator::build_plan(&input, &flat_two_pct_monthly()).unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].total_due, Decimal::new(3533, 2));
        assert_eq!(lines[1].total_due, Decimal::new(3533, 2));
        assert_eq!(lines[2].total_due, Decimal::new(3534, 2));

        let total_interest: Decimal = lines.iter().map(|l| l.interest).sum();
        assert_eq!(total_interest, Decimal::new(600, 2));

        let collected: Decimal = lines.iter().map(|l| l.total_due).sum();
        assert_eq!(collected, Decimal::new(10600, 2));
    }

    #[test]
    fn test_principals_sum_to_financed_amount() {
        let input = PlanInput {
            total: Decimal::new(25000, 2),     // 250.00
            down_payment: Decimal::new(5000, 2), // 50.00
            count: 7,
            frequency: Frequency::Weekly,
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        let lines = PlanCalculator::build_plan(
            &input,
            &rates(Decimal::ZERO, Decimal::new(15, 1), Decimal::ZERO),
        )
        .unwrap();

        let principal_sum: Decimal = lines.iter().map(|l| l.principal).sum();
        assert_eq!(principal_sum, Decimal::new(20000, 2));
    }

    #[test]
    fn test_zero_count_yields_empty_plan() {
        let input = PlanInput {
            total: Decimal::new(10000, 2),
            down_payment: Decimal::ZERO,
            count: 0,
            frequency: Frequency::Daily,
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        let lines = PlanCalculator::build_plan(&input, &flat_two_pct_monthly()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_zero_rate_plan_carries_no_interest() {
        let input = PlanInput {
            total: Decimal::new(9000, 2),
            down_payment: Decimal::ZERO,
            count: 3,
            frequency: Frequency::Daily,
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        let lines = PlanCalculator::build_plan(
            &input,
            &rates(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        )
        .unwrap();

        assert!(lines.iter().all(|l| l.interest == Decimal::ZERO));
        let collected: Decimal = lines.iter().map(|l| l.total_due).sum();
        assert_eq!(collected, Decimal::new(9000, 2));
    }

    #[test]
    fn test_due_dates_advance_by_period() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let input = PlanInput {
            total: Decimal::new(10000, 2),
            down_payment: Decimal::ZERO,
            count: 3,
            frequency: Frequency::Monthly,
            start,
        };

        let lines = PlanCalculator::build_plan(&input, &flat_two_pct_monthly()).unwrap();

        assert_eq!(lines[0].due_date, start + chrono::Duration::days(30));
        assert_eq!(lines[1].due_date, start + chrono::Duration::days(60));
        assert_eq!(lines[2].due_date, start + chrono::Duration::days(90));
    }

    #[test]
    fn test_tiny_amount_over_many_installments_is_rejected() {
        // 75 cents across 47 installments rounds each entry to 2 cents and
        // would leave a negative final entry
        let input = PlanInput {
            total: Decimal::new(75, 2),
            down_payment: Decimal::ZERO,
            count: 47,
            frequency: Frequency::Weekly,
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        assert!(PlanCalculator::build_plan(&input, &flat_two_pct_monthly()).is_err());
    }

    #[test]
    fn test_down_payment_above_total_is_rejected() {
        let input = PlanInput {
            total: Decimal::new(10000, 2),
            down_payment: Decimal::new(15000, 2),
            count: 3,
            frequency: Frequency::Monthly,
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        assert!(PlanCalculator::build_plan(&input, &flat_two_pct_monthly()).is_err());
    }
}
