use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExpenseCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub spent_at: NaiveDateTime,
    pub category_id: i64,
    /// User who recorded the expense
    pub recorded_by: i64,
}

/// Expense joined with category and user names, for listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExpenseDetail {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub spent_at: NaiveDateTime,
    pub category_id: i64,
    pub category_name: String,
    pub recorded_by: i64,
    pub recorded_by_name: String,
}

// Request payloads

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount: Decimal,
    pub category_id: i64,
}
