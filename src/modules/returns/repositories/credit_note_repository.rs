use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::returns::models::CreditNote;

const NOTE_COLUMNS: &str =
    "id, customer_id, return_id, initial_amount, remaining_balance, status, created_at";

/// Repository for customer credit notes
pub struct CreditNoteRepository {
    pool: MySqlPool,
}

impl CreditNoteRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, MySql>,
        customer_id: i64,
        return_id: Option<i64>,
        amount: Decimal,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO credit_notes
                (customer_id, return_id, initial_amount, remaining_balance, status, created_at)
            VALUES (?, ?, ?, ?, 'active', UTC_TIMESTAMP())
            "#,
        )
        .bind(customer_id)
        .bind(return_id)
        .bind(amount)
        .bind(amount)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<CreditNote>> {
        let note = sqlx::query_as::<_, CreditNote>(&format!(
            "SELECT {} FROM credit_notes WHERE id = ?",
            NOTE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    pub async fn lock_for_update(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: i64,
    ) -> Result<CreditNote> {
        sqlx::query_as::<_, CreditNote>(&format!(
            "SELECT {} FROM credit_notes WHERE id = ? FOR UPDATE",
            NOTE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Credit note {}", id)))
    }

    pub async fn update_balance(
        &self,
        tx: &mut Transaction<'_, MySql>,
        note: &CreditNote,
    ) -> Result<()> {
        sqlx::query("UPDATE credit_notes SET remaining_balance = ?, status = ? WHERE id = ?")
            .bind(note.remaining_balance)
            .bind(note.status.as_str())
            .bind(note.id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub async fn list_for_customer(&self, customer_id: i64) -> Result<Vec<CreditNote>> {
        let notes = sqlx::query_as::<_, CreditNote>(&format!(
            "SELECT {} FROM credit_notes WHERE customer_id = ? ORDER BY created_at DESC",
            NOTE_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }
}
