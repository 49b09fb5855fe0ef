use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::Result;
use crate::modules::returns::models::{ReturnedItem, SaleReturn};

/// Repository for return records and their item lists
pub struct ReturnRepository {
    pool: MySqlPool,
}

impl ReturnRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn insert_return(
        &self,
        tx: &mut Transaction<'_, MySql>,
        sale_id: i64,
        motive: Option<&str>,
        refund_total: Decimal,
        charge_total: Decimal,
        balance: Decimal,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO sale_returns
                (sale_id, returned_at, motive, refund_total, charge_total, balance)
            VALUES (?, UTC_TIMESTAMP(), ?, ?, ?, ?)
            "#,
        )
        .bind(sale_id)
        .bind(motive)
        .bind(refund_total)
        .bind(charge_total)
        .bind(balance)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    pub async fn insert_returned_item(
        &self,
        tx: &mut Transaction<'_, MySql>,
        return_id: i64,
        line_item_id: i64,
        product_id: i64,
        quantity: i32,
        unit_price: Decimal,
        restocked: bool,
    ) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO returned_items
                (return_id, line_item_id, product_id, quantity, unit_price, restocked)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(return_id)
        .bind(line_item_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(restocked)
        .execute(&mut **tx)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    /// Units already returned against a line item, across all prior returns
    pub async fn returned_quantity_for_line_item(
        &self,
        tx: &mut Transaction<'_, MySql>,
        line_item_id: i64,
    ) -> Result<i64> {
        let total: (Option<i64>,) = sqlx::query_as(
            "SELECT CAST(SUM(quantity) AS SIGNED) FROM returned_items WHERE line_item_id = ?",
        )
        .bind(line_item_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(total.0.unwrap_or(0))
    }

    pub async fn find_return(&self, id: i64) -> Result<Option<SaleReturn>> {
        let record = sqlx::query_as::<_, SaleReturn>(
            r#"
            SELECT id, sale_id, returned_at, motive, refund_total, charge_total, balance
            FROM sale_returns
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list_for_sale(&self, sale_id: i64) -> Result<Vec<SaleReturn>> {
        let records = sqlx::query_as::<_, SaleReturn>(
            r#"
            SELECT id, sale_id, returned_at, motive, refund_total, charge_total, balance
            FROM sale_returns
            WHERE sale_id = ?
            ORDER BY returned_at, id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn items_for_return(&self, return_id: i64) -> Result<Vec<ReturnedItem>> {
        let items = sqlx::query_as::<_, ReturnedItem>(
            r#"
            SELECT id, return_id, line_item_id, product_id, quantity, unit_price, restocked
            FROM returned_items
            WHERE return_id = ?
            ORDER BY id
            "#,
        )
        .bind(return_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
