use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{AttributeDef, AttributeOption, ProductType};

/// Repository for product types, attribute definitions and their options
pub struct ProductTypeRepository {
    pool: MySqlPool,
}

impl ProductTypeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str) -> Result<ProductType> {
        let result = sqlx::query("INSERT INTO product_types (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false)
                {
                    AppError::validation(format!("Product type '{}' already exists", name))
                } else {
                    AppError::Database(e)
                }
            })?;

        Ok(ProductType {
            id: result.last_insert_id() as i64,
            name: name.to_string(),
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ProductType>> {
        let row = sqlx::query_as::<_, ProductType>(
            "SELECT id, name FROM product_types WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list(&self) -> Result<Vec<ProductType>> {
        let rows =
            sqlx::query_as::<_, ProductType>("SELECT id, name FROM product_types ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM product_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count_products(&self, id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE product_type_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }

    /// Attribute definitions for a type, with options, in declaration order
    pub async fn attributes_for_type(&self, product_type_id: i64) -> Result<Vec<AttributeDef>> {
        let mut attributes = sqlx::query_as::<_, AttributeDef>(
            r#"
            SELECT id, product_type_id, name, field_kind
            FROM attributes
            WHERE product_type_id = ?
            ORDER BY id
            "#,
        )
        .bind(product_type_id)
        .fetch_all(&self.pool)
        .await?;

        for attribute in &mut attributes {
            attribute.options = self.options_for_attribute(attribute.id).await?;
        }

        Ok(attributes)
    }

    pub async fn find_attribute(&self, attribute_id: i64) -> Result<Option<AttributeDef>> {
        let attribute = sqlx::query_as::<_, AttributeDef>(
            "SELECT id, product_type_id, name, field_kind FROM attributes WHERE id = ?",
        )
        .bind(attribute_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut attribute) = attribute else {
            return Ok(None);
        };

        attribute.options = self.options_for_attribute(attribute.id).await?;

        Ok(Some(attribute))
    }

    pub async fn add_attribute(
        &self,
        product_type_id: i64,
        name: &str,
        field_kind: &str,
    ) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO attributes (product_type_id, name, field_kind) VALUES (?, ?, ?)",
        )
        .bind(product_type_id)
        .bind(name)
        .bind(field_kind)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i64)
    }

    pub async fn delete_attribute(&self, attribute_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM attributes WHERE id = ?")
            .bind(attribute_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn add_option(&self, attribute_id: i64, value: &str) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO attribute_options (attribute_id, value) VALUES (?, ?)")
                .bind(attribute_id)
                .bind(value)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_id() as i64)
    }

    async fn options_for_attribute(&self, attribute_id: i64) -> Result<Vec<AttributeOption>> {
        let options = sqlx::query_as::<_, AttributeOption>(
            "SELECT id, attribute_id, value FROM attribute_options WHERE attribute_id = ? ORDER BY id",
        )
        .bind(attribute_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }
}
