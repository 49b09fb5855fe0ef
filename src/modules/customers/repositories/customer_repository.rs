use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, CustomerPayload};

/// Repository for customer records
pub struct CustomerRepository {
    pool: MySqlPool,
}

const COLUMNS: &str = "id, first_name, last_name, id_document, phone, email, address, city";

impl CustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: &CustomerPayload) -> Result<Customer> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (first_name, last_name, id_document, phone, email, address, city)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.id_document)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.address)
        .bind(&payload.city)
        .execute(&self.pool)
        .await
        .map_err(Self::map_unique_email)?;

        let id = result.last_insert_id() as i64;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Customer vanished after insert"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = ?",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn list(&self) -> Result<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers ORDER BY first_name, last_name",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn update(&self, id: i64, payload: &CustomerPayload) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, id_document = ?, phone = ?,
                email = ?, address = ?, city = ?
            WHERE id = ?
            "#,
        )
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.id_document)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.address)
        .bind(&payload.city)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Self::map_unique_email)?;

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// How many sales reference this customer
    pub async fn count_sales(&self, id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sales WHERE customer_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    fn map_unique_email(e: sqlx::Error) -> AppError {
        if e.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
        {
            AppError::validation("A customer with this email already exists")
        } else {
            AppError::Database(e)
        }
    }
}
