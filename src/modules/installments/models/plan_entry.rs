// Installment plan entries for credit sales.
//
// A plan covers the financed balance (total minus down payment) plus flat
// interest, split into equal installments with sequential due dates.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How often installments fall due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Offset from the plan start to the i-th due date (1-based).
    ///
    /// A month is approximated as 30 days, so monthly due dates drift
    /// against the calendar on long plans.
    pub fn offset(&self, index: u32) -> Duration {
        match self {
            Self::Daily => Duration::days(index as i64),
            Self::Weekly => Duration::weeks(index as i64),
            Self::Monthly => Duration::days(30 * index as i64),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Invalid installment frequency: {}", s)),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// Installment entry status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Pending,
    Paid,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl TryFrom<String> for EntryStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Invalid installment status: {}", value)),
        }
    }
}

/// Stored installment entry
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PlanEntry {
    pub id: i64,
    pub sale_id: i64,
    /// Sequential number (1, 2, 3...)
    pub sequence: i32,
    /// Portion of the financed principal
    pub principal: Decimal,
    /// Portion of the total interest
    pub interest: Decimal,
    /// principal + interest
    pub total_due: Decimal,
    pub due_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: EntryStatus,
    /// Payment that settled this entry
    pub payment_id: Option<i64>,
}

/// Computed installment line, before persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanLine {
    pub sequence: i32,
    pub principal: Decimal,
    pub interest: Decimal,
    pub total_due: Decimal,
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_frequency_parsing_rejects_unknown() {
        assert_eq!("daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        // Unknown frequencies fail instead of silently zero-rating interest
        assert!("biweekly".parse::<Frequency>().is_err());
        assert!("Mensual".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_offsets() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert_eq!(
            start + Frequency::Daily.offset(3),
            NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()
        );
        assert_eq!(
            start + Frequency::Weekly.offset(2),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
        // 30-day months, not calendar months
        assert_eq!(
            start + Frequency::Monthly.offset(1),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
        assert_eq!(
            start + Frequency::Monthly.offset(2),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
        );
    }
}
