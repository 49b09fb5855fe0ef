use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::installments::models::{PlanEntry, PlanLine};

const ENTRY_COLUMNS: &str =
    "id, sale_id, sequence, principal, interest, total_due, due_date, status, payment_id";

/// Repository for installment plan entries
pub struct PlanRepository {
    pool: MySqlPool,
}

impl PlanRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn insert_entries(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
        lines: &[PlanLine],
    ) -> Result<()> {
        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO plan_entries
                    (sale_id, sequence, principal, interest, total_due, due_date, status)
                VALUES (?, ?, ?, ?, ?, ?, 'pending')
                "#,
            )
            .bind(sale_id)
            .bind(line.sequence)
            .bind(line.principal)
            .bind(line.interest)
            .bind(line.total_due)
            .bind(line.due_date)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    pub async fn list_for_sale(&self, sale_id: i64) -> Result<Vec<PlanEntry>> {
        let entries = sqlx::query_as::<_, PlanEntry>(&format!(
            "SELECT {} FROM plan_entries WHERE sale_id = ? ORDER BY sequence",
            ENTRY_COLUMNS
        ))
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Lock one entry by (sale, sequence) for the caller's transaction
    pub async fn lock_by_sequence(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
        sequence: i32,
    ) -> Result<PlanEntry> {
        sqlx::query_as::<_, PlanEntry>(&format!(
            "SELECT {} FROM plan_entries WHERE sale_id = ? AND sequence = ? FOR UPDATE",
            ENTRY_COLUMNS
        ))
        .bind(sale_id)
        .bind(sequence)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Installment {} of sale {}", sequence, sale_id))
        })
    }

    pub async fn mark_paid(
        &self,
        tx: &mut Transaction<'_, MySql>,
        entry_id: i64,
        payment_id: i64,
    ) -> Result<()> {
        sqlx::query("UPDATE plan_entries SET status = 'paid', payment_id = ? WHERE id = ?")
            .bind(payment_id)
            .bind(entry_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub async fn count_pending(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
    ) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM plan_entries WHERE sale_id = ? AND status = 'pending'",
        )
        .bind(sale_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(count.0)
    }
}
