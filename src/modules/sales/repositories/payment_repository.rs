use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::Result;
use crate::modules::sales::models::{Payment, PaymentMethod};

/// Repository for payments recorded against sales
pub struct PaymentRepository {
    pool: MySqlPool,
}

impl PaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
        amount: Decimal,
        method: PaymentMethod,
        proof_path: Option<&str>,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (sale_id, amount, method, paid_at, proof_path)
            VALUES (?, ?, ?, UTC_TIMESTAMP(), ?)
            "#,
        )
        .bind(sale_id)
        .bind(amount)
        .bind(method.as_str())
        .bind(proof_path)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    pub async fn list_for_sale(&self, sale_id: i64) -> Result<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, sale_id, amount, method, paid_at, proof_path
            FROM payments
            WHERE sale_id = ?
            ORDER BY paid_at, id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn paid_total(&self, sale_id: i64) -> Result<Decimal> {
        let total: (Option<Decimal>,) =
            sqlx::query_as("SELECT SUM(amount) FROM payments WHERE sale_id = ?")
                .bind(sale_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(total.0.unwrap_or(Decimal::ZERO))
    }

    /// Paid total read inside the caller's transaction, so the settlement
    /// check sees payments recorded earlier in the same transaction
    pub async fn paid_total_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
    ) -> Result<Decimal> {
        let total: (Option<Decimal>,) =
            sqlx::query_as("SELECT SUM(amount) FROM payments WHERE sale_id = ?")
                .bind(sale_id)
                .fetch_one(&mut **tx)
                .await?;

        Ok(total.0.unwrap_or(Decimal::ZERO))
    }
}
