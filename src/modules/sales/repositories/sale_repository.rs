use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::sales::models::{LineItem, LineItemDetail, Sale};

const SALE_COLUMNS: &str = "id, customer_id, sold_at, total_amount, status, notes, payment_kind, \
     installment_count, installment_frequency, down_payment, annulled_by, annulment_motive, annulled_at";

/// Repository for sales and their line items.
///
/// Mutating operations take the caller's transaction: cart edits, payments,
/// annulments and returns all touch several rows and must commit atomically.
pub struct SaleRepository {
    pool: MySqlPool,
}

impl SaleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, customer_id: i64, notes: Option<&str>) -> Result<Sale> {
        let result = sqlx::query(
            r#"
            INSERT INTO sales (customer_id, sold_at, total_amount, status, notes, payment_kind)
            VALUES (?, UTC_TIMESTAMP(), 0, 'draft', ?, 'cash')
            "#,
        )
        .bind(customer_id)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Sale vanished after insert"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {} FROM sales WHERE id = ?",
            SALE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lock the sale row for the duration of the caller's transaction
    pub async fn lock_for_update(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: i64,
    ) -> Result<Sale> {
        sqlx::query_as::<_, Sale>(&format!(
            "SELECT {} FROM sales WHERE id = ? FOR UPDATE",
            SALE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Sale {}", id)))
    }

    pub async fn list(&self) -> Result<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {} FROM sales ORDER BY sold_at DESC",
            SALE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Persist the sale's mutable columns inside the caller's transaction
    pub async fn update(&self, tx: &mut Transaction<'_, MySql>, sale: &Sale) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE sales
            SET total_amount = ?, status = ?, notes = ?, payment_kind = ?,
                installment_count = ?, installment_frequency = ?, down_payment = ?,
                annulled_by = ?, annulment_motive = ?, annulled_at = ?
            WHERE id = ?
            "#,
        )
        .bind(sale.total_amount)
        .bind(sale.status.as_str())
        .bind(&sale.notes)
        .bind(sale.payment_kind.as_str())
        .bind(sale.installment_count)
        .bind(&sale.installment_frequency)
        .bind(sale.down_payment)
        .bind(sale.annulled_by)
        .bind(&sale.annulment_motive)
        .bind(sale.annulled_at)
        .bind(sale.id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn update_notes(&self, id: i64, notes: Option<&str>) -> Result<()> {
        sqlx::query("UPDATE sales SET notes = ? WHERE id = ?")
            .bind(notes)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // Line items

    pub async fn line_items(&self, sale_id: i64) -> Result<Vec<LineItemDetail>> {
        let items = sqlx::query_as::<_, LineItemDetail>(
            r#"
            SELECT li.id, li.sale_id, li.product_id, p.name AS product_name,
                   li.quantity, li.unit_price
            FROM line_items li
            JOIN products p ON p.id = li.product_id
            WHERE li.sale_id = ?
            ORDER BY li.id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn line_items_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
    ) -> Result<Vec<LineItem>> {
        let items = sqlx::query_as::<_, LineItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price
            FROM line_items
            WHERE sale_id = ?
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(items)
    }

    pub async fn count_line_items(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
    ) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM line_items WHERE sale_id = ?")
            .bind(sale_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(count.0)
    }

    pub async fn insert_line_item(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
        product_id: i64,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO line_items (sale_id, product_id, quantity, unit_price)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    pub async fn find_line_item(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: i64,
    ) -> Result<Option<LineItem>> {
        let item = sqlx::query_as::<_, LineItem>(
            "SELECT id, sale_id, product_id, quantity, unit_price FROM line_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(item)
    }

    pub async fn delete_line_item(&self, tx: &mut Transaction<'_, MySql>, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM line_items WHERE id = ?")
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub async fn set_line_item_quantity(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: i64,
        quantity: i32,
    ) -> Result<()> {
        sqlx::query("UPDATE line_items SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Recompute the sale total from its line items and persist it.
    /// Keeps the stored total consistent with the cart by construction.
    pub async fn recompute_total(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
    ) -> Result<Decimal> {
        let total: (Option<Decimal>,) = sqlx::query_as(
            "SELECT SUM(quantity * unit_price) FROM line_items WHERE sale_id = ?",
        )
        .bind(sale_id)
        .fetch_one(&mut **tx)
        .await?;

        let total = total.0.unwrap_or(Decimal::ZERO);

        sqlx::query("UPDATE sales SET total_amount = ? WHERE id = ?")
            .bind(total)
            .bind(sale_id)
            .execute(&mut **tx)
            .await?;

        Ok(total)
    }
}
