use sqlx::{MySql, MySqlPool, Transaction};

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{AttributeValue, AttributeValueInput, Product};

/// Repository for products and their attribute values.
///
/// Also exposes the stock primitives used by the sales and returns flows:
/// callers lock the product row inside their own transaction before touching
/// stock, so concurrent cart edits cannot read stale quantities.
pub struct ProductRepository {
    pool: MySqlPool,
}

impl ProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        price: rust_decimal::Decimal,
        stock: i32,
        product_type_id: i64,
        attributes: &[AttributeValueInput],
    ) -> Result<Product> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, stock, product_type_id, created_at)
            VALUES (?, ?, ?, ?, ?, UTC_TIMESTAMP())
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(stock)
        .bind(product_type_id)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_id() as i64;

        for attr in attributes {
            sqlx::query(
                "INSERT INTO product_attribute_values (product_id, attribute_id, value) VALUES (?, ?, ?)",
            )
            .bind(id)
            .bind(attr.attribute_id)
            .bind(&attr.value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Product vanished after insert"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock, product_type_id, created_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock, product_type_id, created_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
        price: rust_decimal::Decimal,
        stock: i32,
        attributes: &[AttributeValueInput],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE products SET name = ?, description = ?, price = ?, stock = ? WHERE id = ?",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(stock)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        // Replace attribute values wholesale; the set is small
        sqlx::query("DELETE FROM product_attribute_values WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for attr in attributes {
            sqlx::query(
                "INSERT INTO product_attribute_values (product_id, attribute_id, value) VALUES (?, ?, ?)",
            )
            .bind(id)
            .bind(attr.attribute_id)
            .bind(&attr.value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn values_for_product(&self, product_id: i64) -> Result<Vec<AttributeValue>> {
        let values = sqlx::query_as::<_, AttributeValue>(
            r#"
            SELECT v.attribute_id, a.name, a.field_kind, v.value
            FROM product_attribute_values v
            JOIN attributes a ON a.id = v.attribute_id
            WHERE v.product_id = ?
            ORDER BY a.id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    /// How many sale line items reference this product
    pub async fn count_line_item_refs(&self, product_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM line_items WHERE product_id = ?")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    /// Lock the product row for the duration of the caller's transaction
    pub async fn lock_for_update(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: i64,
    ) -> Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock, product_type_id, created_at
            FROM products
            WHERE id = ?
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))
    }

    /// Apply a stock delta inside the caller's transaction.
    /// The row must already be locked via `lock_for_update`.
    pub async fn adjust_stock(
        &self,
        tx: &mut Transaction<'_, MySql>,
        id: i64,
        delta: i32,
    ) -> Result<()> {
        sqlx::query("UPDATE products SET stock = stock + ? WHERE id = ?")
            .bind(delta)
            .bind(id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
