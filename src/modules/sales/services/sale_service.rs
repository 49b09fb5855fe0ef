use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::modules::catalog::repositories::ProductRepository;
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::sales::models::{
    AddLineItemRequest, AnnulSaleRequest, OpenSaleRequest, Sale, SaleDetail, UpdateNotesRequest,
};
use crate::modules::sales::repositories::{PaymentRepository, SaleRepository};

/// Business logic for the sale lifecycle: draft cart, finalization, annulment.
///
/// Every mutating operation runs in one transaction and locks the sale row
/// (and any touched product rows) first, so two concurrent cart edits cannot
/// both read stale stock.
pub struct SaleService {
    pool: MySqlPool,
    sales: SaleRepository,
    payments: PaymentRepository,
    products: ProductRepository,
    customers: CustomerRepository,
}

impl SaleService {
    pub fn new(
        pool: MySqlPool,
        sales: SaleRepository,
        payments: PaymentRepository,
        products: ProductRepository,
        customers: CustomerRepository,
    ) -> Self {
        Self {
            pool,
            sales,
            payments,
            products,
            customers,
        }
    }

    pub async fn open_sale(&self, request: OpenSaleRequest) -> Result<SaleDetail> {
        self.customers
            .find_by_id(request.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {}", request.customer_id)))?;

        let sale = self
            .sales
            .create(request.customer_id, request.notes.as_deref())
            .await?;

        info!(sale_id = sale.id, "Sale opened");

        self.get_sale(sale.id).await
    }

    pub async fn get_sale(&self, id: i64) -> Result<SaleDetail> {
        let sale = self
            .sales
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {}", id)))?;

        self.to_detail(sale).await
    }

    pub async fn list_sales(&self) -> Result<Vec<Sale>> {
        self.sales.list().await
    }

    pub async fn update_notes(&self, id: i64, request: UpdateNotesRequest) -> Result<SaleDetail> {
        let sale = self
            .sales
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {}", id)))?;

        if !sale.is_editable() {
            return Err(AppError::validation(
                "This sale is finalized and can no longer be modified",
            ));
        }

        self.sales
            .update_notes(id, request.notes.as_deref())
            .await?;

        self.get_sale(id).await
    }

    /// Add a product to a draft sale, snapshotting the current price and
    /// decrementing stock in the same transaction.
    pub async fn add_line_item(
        &self,
        sale_id: i64,
        request: AddLineItemRequest,
    ) -> Result<SaleDetail> {
        if request.quantity < 1 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }

        let mut tx = self.pool.begin().await?;

        let sale = self.sales.lock_for_update(&mut tx, sale_id).await?;
        if !sale.is_editable() {
            return Err(AppError::validation(
                "This sale is finalized and can no longer be modified",
            ));
        }

        let product = self
            .products
            .lock_for_update(&mut tx, request.product_id)
            .await?;

        if request.quantity > product.stock {
            return Err(AppError::validation(format!(
                "Not enough stock for {}: {} available",
                product.name, product.stock
            )));
        }

        self.sales
            .insert_line_item(
                &mut tx,
                sale_id,
                product.id,
                request.quantity,
                product.price,
            )
            .await?;

        self.products
            .adjust_stock(&mut tx, product.id, -request.quantity)
            .await?;

        self.sales.recompute_total(&mut tx, sale_id).await?;

        tx.commit().await?;

        self.get_sale(sale_id).await
    }

    /// Remove a line item from a draft sale, restoring its stock
    pub async fn remove_line_item(&self, sale_id: i64, item_id: i64) -> Result<SaleDetail> {
        let mut tx = self.pool.begin().await?;

        let sale = self.sales.lock_for_update(&mut tx, sale_id).await?;
        if !sale.is_editable() {
            return Err(AppError::validation(
                "This sale is finalized and can no longer be modified",
            ));
        }

        let item = self
            .sales
            .find_line_item(&mut tx, item_id)
            .await?
            .filter(|item| item.sale_id == sale_id)
            .ok_or_else(|| AppError::not_found(format!("Line item {}", item_id)))?;

        self.products
            .lock_for_update(&mut tx, item.product_id)
            .await?;
        self.products
            .adjust_stock(&mut tx, item.product_id, item.quantity)
            .await?;

        self.sales.delete_line_item(&mut tx, item_id).await?;
        self.sales.recompute_total(&mut tx, sale_id).await?;

        tx.commit().await?;

        self.get_sale(sale_id).await
    }

    /// Finalize a draft as a cash sale awaiting payment
    pub async fn finalize_cash(&self, sale_id: i64) -> Result<SaleDetail> {
        let mut tx = self.pool.begin().await?;

        let mut sale = self.sales.lock_for_update(&mut tx, sale_id).await?;
        let item_count = self.sales.count_line_items(&mut tx, sale_id).await?;

        sale.finalize_cash(item_count as usize)?;

        self.sales.update(&mut tx, &sale).await?;

        tx.commit().await?;

        info!(sale_id, "Sale finalized for cash payment");

        self.get_sale(sale_id).await
    }

    /// Annul a sale, restoring stock for all its line items. Terminal.
    pub async fn annul_sale(
        &self,
        sale_id: i64,
        request: AnnulSaleRequest,
        current: &CurrentUser,
    ) -> Result<SaleDetail> {
        let mut tx = self.pool.begin().await?;

        let mut sale = self.sales.lock_for_update(&mut tx, sale_id).await?;
        sale.annul(&request.motive, current.id, Utc::now().naive_utc())?;

        let items = self.sales.line_items_tx(&mut tx, sale_id).await?;
        for item in &items {
            self.products
                .lock_for_update(&mut tx, item.product_id)
                .await?;
            self.products
                .adjust_stock(&mut tx, item.product_id, item.quantity)
                .await?;
        }

        self.sales.update(&mut tx, &sale).await?;

        tx.commit().await?;

        info!(sale_id, user_id = current.id, "Sale annulled");

        self.get_sale(sale_id).await
    }

    async fn to_detail(&self, sale: Sale) -> Result<SaleDetail> {
        let line_items = self.sales.line_items(sale.id).await?;
        let payments = self.payments.list_for_sale(sale.id).await?;
        let paid_total = self.payments.paid_total(sale.id).await?;
        let outstanding = (sale.total_amount - paid_total).max(Decimal::ZERO);

        Ok(SaleDetail {
            sale,
            line_items,
            payments,
            paid_total,
            outstanding,
        })
    }
}
