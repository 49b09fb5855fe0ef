use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::expenses::models::{Expense, ExpenseCategory, ExpenseDetail};

/// Repository for expenses and their categories
pub struct ExpenseRepository {
    pool: MySqlPool,
}

impl ExpenseRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    // Categories

    pub async fn create_category(&self, name: &str) -> Result<ExpenseCategory> {
        let result = sqlx::query("INSERT INTO expense_categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false)
                {
                    AppError::validation(format!("Expense category '{}' already exists", name))
                } else {
                    AppError::Database(e)
                }
            })?;

        Ok(ExpenseCategory {
            id: result.last_insert_id() as i64,
            name: name.to_string(),
        })
    }

    pub async fn find_category(&self, id: i64) -> Result<Option<ExpenseCategory>> {
        let category = sqlx::query_as::<_, ExpenseCategory>(
            "SELECT id, name FROM expense_categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn list_categories(&self) -> Result<Vec<ExpenseCategory>> {
        let categories = sqlx::query_as::<_, ExpenseCategory>(
            "SELECT id, name FROM expense_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM expense_categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count_expenses_in_category(&self, id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM expenses WHERE category_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Find or create a category by name, inside the caller's transaction.
    /// Used by the returns flow for its dedicated refund category.
    pub async fn ensure_category(
        &self,
        tx: &mut Transaction<'_, MySql>,
        name: &str,
    ) -> Result<i64> {
        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM expense_categories WHERE name = ?")
                .bind(name)
                .fetch_optional(&mut **tx)
                .await?;

        if let Some((id,)) = existing {
            return Ok(id);
        }

        let result = sqlx::query("INSERT INTO expense_categories (name) VALUES (?)")
            .bind(name)
            .execute(&mut **tx)
            .await?;

        Ok(result.last_insert_id() as i64)
    }

    // Expenses

    pub async fn create_expense(
        &self,
        description: &str,
        amount: Decimal,
        category_id: i64,
        recorded_by: i64,
    ) -> Result<Expense> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (description, amount, spent_at, category_id, recorded_by)
            VALUES (?, ?, UTC_TIMESTAMP(), ?, ?)
            "#,
        )
        .bind(description)
        .bind(amount)
        .bind(category_id)
        .bind(recorded_by)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        let expense = sqlx::query_as::<_, Expense>(
            "SELECT id, description, amount, spent_at, category_id, recorded_by FROM expenses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        expense.ok_or_else(|| AppError::internal("Expense vanished after insert"))
    }

    /// Insert an expense inside the caller's transaction (returns flow)
    pub async fn insert_expense_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        description: &str,
        amount: Decimal,
        category_id: i64,
        recorded_by: i64,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (description, amount, spent_at, category_id, recorded_by)
            VALUES (?, ?, UTC_TIMESTAMP(), ?, ?)
            "#,
        )
        .bind(description)
        .bind(amount)
        .bind(category_id)
        .bind(recorded_by)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    pub async fn list_expenses(&self) -> Result<Vec<ExpenseDetail>> {
        let expenses = sqlx::query_as::<_, ExpenseDetail>(
            r#"
            SELECT e.id, e.description, e.amount, e.spent_at, e.category_id,
                   c.name AS category_name, e.recorded_by, u.name AS recorded_by_name
            FROM expenses e
            JOIN expense_categories c ON c.id = e.category_id
            JOIN users u ON u.id = e.recorded_by
            ORDER BY e.spent_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn find_expense(&self, id: i64) -> Result<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(
            "SELECT id, description, amount, spent_at, category_id, recorded_by FROM expenses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
