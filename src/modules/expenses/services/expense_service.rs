use rust_decimal::Decimal;

use crate::core::{money, AppError, Result};
use crate::middleware::CurrentUser;
use crate::modules::expenses::models::{
    CreateCategoryRequest, CreateExpenseRequest, Expense, ExpenseCategory, ExpenseDetail,
};
use crate::modules::expenses::repositories::ExpenseRepository;

/// Business logic for expense tracking
pub struct ExpenseService {
    repo: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(repo: ExpenseRepository) -> Self {
        Self { repo }
    }

    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<ExpenseCategory> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation("Category name is required"));
        }

        self.repo.create_category(request.name.trim()).await
    }

    pub async fn list_categories(&self) -> Result<Vec<ExpenseCategory>> {
        self.repo.list_categories().await
    }

    /// Delete a category. Rejected while expenses reference it, with a
    /// descriptive message instead of a bare constraint error.
    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.repo
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Expense category {}", id)))?;

        let in_use = self.repo.count_expenses_in_category(id).await?;
        if in_use > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete this category: {} expense(s) are filed under it",
                in_use
            )));
        }

        self.repo.delete_category(id).await
    }

    pub async fn create_expense(
        &self,
        request: CreateExpenseRequest,
        current: &CurrentUser,
    ) -> Result<Expense> {
        if request.description.trim().is_empty() {
            return Err(AppError::validation("Expense description is required"));
        }
        if request.amount <= Decimal::ZERO {
            return Err(AppError::validation("Expense amount must be positive"));
        }
        money::validate_amount(request.amount).map_err(AppError::validation)?;

        self.repo
            .find_category(request.category_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Expense category {}", request.category_id))
            })?;

        self.repo
            .create_expense(
                request.description.trim(),
                request.amount,
                request.category_id,
                current.id,
            )
            .await
    }

    pub async fn list_expenses(&self) -> Result<Vec<ExpenseDetail>> {
        self.repo.list_expenses().await
    }

    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        self.repo
            .find_expense(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Expense {}", id)))?;

        self.repo.delete_expense(id).await
    }
}
