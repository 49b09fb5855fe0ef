use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::info;

use crate::core::{money, AppError, Result};
use crate::modules::sales::models::{Payment, RecordPaymentRequest, SaleStatus};
use crate::modules::sales::repositories::{PaymentRepository, SaleRepository};

/// Business logic for manual payments against a sale
pub struct PaymentService {
    pool: MySqlPool,
    sales: SaleRepository,
    payments: PaymentRepository,
}

impl PaymentService {
    pub fn new(pool: MySqlPool, sales: SaleRepository, payments: PaymentRepository) -> Self {
        Self {
            pool,
            sales,
            payments,
        }
    }

    /// Record a payment. The amount may never exceed the remaining balance,
    /// and once payments cover the total the sale transitions to Paid.
    pub async fn record_payment(
        &self,
        sale_id: i64,
        request: RecordPaymentRequest,
    ) -> Result<Payment> {
        if request.amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be positive"));
        }
        money::validate_amount(request.amount).map_err(AppError::validation)?;

        let mut tx = self.pool.begin().await?;

        let mut sale = self.sales.lock_for_update(&mut tx, sale_id).await?;

        match sale.status {
            SaleStatus::AwaitingPayment | SaleStatus::Credit | SaleStatus::HasReturn => {}
            SaleStatus::Draft => {
                return Err(AppError::validation(
                    "Finalize the sale before recording payments",
                ))
            }
            other => {
                return Err(AppError::validation(format!(
                    "Payments are not accepted on a {} sale",
                    other
                )))
            }
        }

        let paid_before = self.payments.paid_total_tx(&mut tx, sale_id).await?;
        let remaining = sale.total_amount - paid_before;

        if request.amount > remaining {
            return Err(AppError::validation(format!(
                "The payment exceeds the remaining balance ({})",
                money::format_amount(remaining),
            )));
        }

        let payment_id = self
            .payments
            .insert(
                &mut tx,
                sale_id,
                request.amount,
                request.method,
                request.proof_path.as_deref(),
            )
            .await?;

        let paid_total = paid_before + request.amount;

        // HasReturn never reverts; only pre-settlement states promote to Paid
        if matches!(
            sale.status,
            SaleStatus::AwaitingPayment | SaleStatus::Credit
        ) && sale.settles(paid_total)
        {
            sale.mark_paid(paid_total)?;
            self.sales.update(&mut tx, &sale).await?;
        }

        tx.commit().await?;

        info!(sale_id, payment_id, "Payment recorded");

        let payments = self.payments.list_for_sale(sale_id).await?;
        payments
            .into_iter()
            .find(|p| p.id == payment_id)
            .ok_or_else(|| AppError::internal("Payment vanished after insert"))
    }

    pub async fn list_payments(&self, sale_id: i64) -> Result<Vec<Payment>> {
        self.sales
            .find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {}", sale_id)))?;

        self.payments.list_for_sale(sale_id).await
    }
}
