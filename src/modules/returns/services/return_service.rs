use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::info;

use crate::core::{money, AppError, Result};
use crate::middleware::CurrentUser;
use crate::modules::catalog::repositories::ProductRepository;
use crate::modules::expenses::repositories::ExpenseRepository;
use crate::modules::returns::models::{
    CreateReturnRequest, CreditNote, RedeemCreditNoteRequest, RefundChannel, ReturnDetail,
    ReturnOutcome,
};
use crate::modules::returns::repositories::{CreditNoteRepository, ReturnRepository};
use crate::modules::returns::services::balance_reconciler::{
    reconcile, AddedLine, ReturnedLine, Settlement,
};
use crate::modules::sales::models::{PaymentMethod, SaleStatus};
use crate::modules::sales::repositories::{PaymentRepository, SaleRepository};
use crate::modules::settings::repositories::SettingsRepository;

/// Category that refund expenses are filed under
const REFUND_CATEGORY: &str = "Customer refunds";

/// Business logic for returns, exchanges and credit notes.
///
/// A return runs as one transaction: line-item and stock adjustments, the
/// audit record, and the monetary settlement all commit together.
pub struct ReturnService {
    pool: MySqlPool,
    sales: SaleRepository,
    payments: PaymentRepository,
    products: ProductRepository,
    returns: ReturnRepository,
    notes: CreditNoteRepository,
    expenses: ExpenseRepository,
    settings: SettingsRepository,
}

impl ReturnService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: MySqlPool,
        sales: SaleRepository,
        payments: PaymentRepository,
        products: ProductRepository,
        returns: ReturnRepository,
        notes: CreditNoteRepository,
        expenses: ExpenseRepository,
        settings: SettingsRepository,
    ) -> Self {
        Self {
            pool,
            sales,
            payments,
            products,
            returns,
            notes,
            expenses,
            settings,
        }
    }

    pub async fn process_return(
        &self,
        sale_id: i64,
        request: CreateReturnRequest,
        current: &CurrentUser,
    ) -> Result<ReturnOutcome> {
        if request.items.is_empty() {
            return Err(AppError::validation(
                "A return needs at least one returned item",
            ));
        }
        for item in &request.items {
            if item.quantity < 1 {
                return Err(AppError::validation(
                    "Returned quantities must be at least 1",
                ));
            }
        }
        for item in &request.new_items {
            if item.quantity < 1 {
                return Err(AppError::validation(
                    "Exchange quantities must be at least 1",
                ));
            }
        }

        let settings = self.settings.load().await?;

        let mut tx = self.pool.begin().await?;

        let mut sale = self.sales.lock_for_update(&mut tx, sale_id).await?;
        sale.register_return()?;

        if settings.return_window_days > 0 {
            let deadline = sale.sold_at + Duration::days(settings.return_window_days as i64);
            if Utc::now().naive_utc() > deadline {
                return Err(AppError::validation(format!(
                    "The {}-day return window for this sale has closed",
                    settings.return_window_days
                )));
            }
        }

        // Returned side: validate against the line items, restock flagged
        // units, shrink the line quantities
        let mut returned_lines = Vec::with_capacity(request.items.len());
        for input in &request.items {
            let item = self
                .sales
                .find_line_item(&mut tx, input.line_item_id)
                .await?
                .filter(|item| item.sale_id == sale_id)
                .ok_or_else(|| {
                    AppError::not_found(format!("Line item {}", input.line_item_id))
                })?;

            // Cumulative returned quantity can never exceed the sold
            // quantity; the line's current quantity is what is left
            if input.quantity > item.quantity {
                let prior = self
                    .returns
                    .returned_quantity_for_line_item(&mut tx, item.id)
                    .await?;
                return Err(AppError::validation(format!(
                    "Cannot return {} units of line item {}: {} sold, {} already returned",
                    input.quantity,
                    item.id,
                    item.quantity + prior as i32,
                    prior
                )));
            }

            if input.restock {
                self.products
                    .lock_for_update(&mut tx, item.product_id)
                    .await?;
                self.products
                    .adjust_stock(&mut tx, item.product_id, input.quantity)
                    .await?;
            }

            self.sales
                .set_line_item_quantity(&mut tx, item.id, item.quantity - input.quantity)
                .await?;

            returned_lines.push((input, item));
        }

        let reconciler_returned: Vec<ReturnedLine> = returned_lines
            .iter()
            .map(|(input, item)| ReturnedLine {
                quantity: input.quantity,
                unit_price: item.unit_price,
            })
            .collect();

        // Exchange side: stock-guarded line items at the current price
        let mut added_lines = Vec::with_capacity(request.new_items.len());
        for input in &request.new_items {
            let product = self
                .products
                .lock_for_update(&mut tx, input.product_id)
                .await?;

            if input.quantity > product.stock {
                return Err(AppError::validation(format!(
                    "Not enough stock for {}: {} available",
                    product.name, product.stock
                )));
            }

            self.sales
                .insert_line_item(&mut tx, sale_id, product.id, input.quantity, product.price)
                .await?;
            self.products
                .adjust_stock(&mut tx, product.id, -input.quantity)
                .await?;

            added_lines.push(AddedLine {
                quantity: input.quantity,
                unit_price: product.price,
            });
        }

        let rec = reconcile(&reconciler_returned, &added_lines);

        let return_id = self
            .returns
            .insert_return(
                &mut tx,
                sale_id,
                request.motive.as_deref(),
                rec.refund_total,
                rec.charge_total,
                rec.balance,
            )
            .await?;

        for (input, item) in &returned_lines {
            self.returns
                .insert_returned_item(
                    &mut tx,
                    return_id,
                    item.id,
                    item.product_id,
                    input.quantity,
                    item.unit_price,
                    input.restock,
                )
                .await?;
        }

        // The sale total follows the adjusted line items
        self.sales.recompute_total(&mut tx, sale_id).await?;

        let mut payment_id = None;
        let mut expense_id = None;
        let mut credit_note_id = None;

        match rec.settlement() {
            Settlement::CustomerOwes(amount) => {
                let method = request.payment_method.unwrap_or(PaymentMethod::Cash);
                payment_id = Some(
                    self.payments
                        .insert(&mut tx, sale_id, amount, method, None)
                        .await?,
                );
            }
            Settlement::StoreOwes(amount) => match request.refund_channel {
                RefundChannel::Expense => {
                    let category_id = self
                        .expenses
                        .ensure_category(&mut tx, REFUND_CATEGORY)
                        .await?;
                    expense_id = Some(
                        self.expenses
                            .insert_expense_tx(
                                &mut tx,
                                &format!("Refund for return #{} on sale #{}", return_id, sale_id),
                                amount,
                                category_id,
                                current.id,
                            )
                            .await?,
                    );
                }
                RefundChannel::CreditNote => {
                    credit_note_id = Some(
                        self.notes
                            .insert(&mut tx, sale.customer_id, Some(return_id), amount)
                            .await?,
                    );
                }
            },
            Settlement::Even => {}
        }

        self.sales.update(&mut tx, &sale).await?;

        tx.commit().await?;

        info!(
            sale_id,
            return_id,
            balance = %rec.balance,
            "Return reconciled"
        );

        let record = self
            .returns
            .find_return(return_id)
            .await?
            .ok_or_else(|| AppError::internal("Return vanished after insert"))?;
        let items = self.returns.items_for_return(return_id).await?;

        Ok(ReturnOutcome {
            detail: ReturnDetail { record, items },
            payment_id,
            expense_id,
            credit_note_id,
        })
    }

    pub async fn list_returns(&self, sale_id: i64) -> Result<Vec<ReturnDetail>> {
        self.sales
            .find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {}", sale_id)))?;

        let records = self.returns.list_for_sale(sale_id).await?;

        let mut details = Vec::with_capacity(records.len());
        for record in records {
            let items = self.returns.items_for_return(record.id).await?;
            details.push(ReturnDetail { record, items });
        }

        Ok(details)
    }

    pub async fn list_credit_notes(&self, customer_id: i64) -> Result<Vec<CreditNote>> {
        self.notes.list_for_customer(customer_id).await
    }

    /// Spend a credit note against a sale's outstanding balance. The note
    /// must belong to the sale's customer.
    pub async fn redeem_credit_note(
        &self,
        note_id: i64,
        request: RedeemCreditNoteRequest,
    ) -> Result<CreditNote> {
        let mut tx = self.pool.begin().await?;

        let mut note = self.notes.lock_for_update(&mut tx, note_id).await?;
        let mut sale = self.sales.lock_for_update(&mut tx, request.sale_id).await?;

        if note.customer_id != sale.customer_id {
            return Err(AppError::validation(
                "This credit note belongs to a different customer",
            ));
        }

        match sale.status {
            SaleStatus::AwaitingPayment | SaleStatus::Credit | SaleStatus::HasReturn => {}
            other => {
                return Err(AppError::validation(format!(
                    "Payments are not accepted on a {} sale",
                    other
                )))
            }
        }

        let paid_before = self.payments.paid_total_tx(&mut tx, sale.id).await?;
        let outstanding = sale.total_amount - paid_before;
        if outstanding <= Decimal::ZERO {
            return Err(AppError::validation("This sale has no outstanding balance"));
        }

        let amount = request
            .amount
            .unwrap_or_else(|| note.remaining_balance.min(outstanding));

        if amount > outstanding {
            return Err(AppError::validation(format!(
                "The redeemed amount exceeds the remaining balance ({})",
                money::format_amount(outstanding),
            )));
        }

        note.redeem(amount)?;

        self.payments
            .insert(&mut tx, sale.id, amount, PaymentMethod::StoreCredit, None)
            .await?;
        self.notes.update_balance(&mut tx, &note).await?;

        let paid_total = paid_before + amount;
        if matches!(
            sale.status,
            SaleStatus::AwaitingPayment | SaleStatus::Credit
        ) && sale.settles(paid_total)
        {
            sale.mark_paid(paid_total)?;
            self.sales.update(&mut tx, &sale).await?;
        }

        tx.commit().await?;

        info!(note_id, sale_id = sale.id, "Credit note redeemed");

        self.notes
            .find_by_id(note_id)
            .await?
            .ok_or_else(|| AppError::internal("Credit note vanished after update"))
    }
}
