use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, CustomerPayload};
use crate::modules::customers::repositories::CustomerRepository;

/// Business logic for customer records
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    pub async fn create_customer(&self, payload: CustomerPayload) -> Result<Customer> {
        if payload.first_name.trim().is_empty() {
            return Err(AppError::validation("Customer name is required"));
        }

        self.repo.create(&payload).await
    }

    pub async fn get_customer(&self, id: i64) -> Result<Customer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {}", id)))
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.repo.list().await
    }

    pub async fn update_customer(&self, id: i64, payload: CustomerPayload) -> Result<Customer> {
        self.get_customer(id).await?;

        if payload.first_name.trim().is_empty() {
            return Err(AppError::validation("Customer name is required"));
        }

        self.repo.update(id, &payload).await?;
        self.get_customer(id).await
    }

    /// Delete a customer. Rejected while sales reference the record.
    pub async fn delete_customer(&self, id: i64) -> Result<()> {
        self.get_customer(id).await?;

        let sales = self.repo.count_sales(id).await?;
        if sales > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete this customer: {} sale(s) reference them",
                sales
            )));
        }

        self.repo.delete(id).await
    }
}
