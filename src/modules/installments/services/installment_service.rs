use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::installments::models::{
    EntryStatus, FinalizeCreditRequest, PayInstallmentRequest, PlanEntry,
};
use crate::modules::installments::repositories::PlanRepository;
use crate::modules::installments::services::plan_calculator::{PlanCalculator, PlanInput};
use crate::modules::sales::models::{PaymentMethod, SaleStatus};
use crate::modules::sales::repositories::{PaymentRepository, SaleRepository};
use crate::modules::settings::repositories::SettingsRepository;

/// Business logic for credit sales: plan generation and installment payments
pub struct InstallmentService {
    pool: MySqlPool,
    sales: SaleRepository,
    payments: PaymentRepository,
    plans: PlanRepository,
    settings: SettingsRepository,
}

impl InstallmentService {
    pub fn new(
        pool: MySqlPool,
        sales: SaleRepository,
        payments: PaymentRepository,
        plans: PlanRepository,
        settings: SettingsRepository,
    ) -> Self {
        Self {
            pool,
            sales,
            payments,
            plans,
            settings,
        }
    }

    /// Finalize a draft as a credit sale: generate the installment plan from
    /// the configured interest rates and record the down payment, if any.
    pub async fn finalize_credit(
        &self,
        sale_id: i64,
        request: FinalizeCreditRequest,
    ) -> Result<Vec<PlanEntry>> {
        let rates = self.settings.load().await?.interest_rates();

        let mut tx = self.pool.begin().await?;

        let mut sale = self.sales.lock_for_update(&mut tx, sale_id).await?;
        let item_count = self.sales.count_line_items(&mut tx, sale_id).await?;

        sale.finalize_credit(
            item_count as usize,
            request.installment_count,
            request.frequency,
            request.down_payment,
        )?;

        let input = PlanInput {
            total: sale.total_amount,
            down_payment: request.down_payment,
            count: request.installment_count,
            frequency: request.frequency,
            start: Utc::now().date_naive(),
        };
        let lines = PlanCalculator::build_plan(&input, &rates)?;

        self.plans.insert_entries(&mut tx, sale_id, &lines).await?;

        if request.down_payment > Decimal::ZERO {
            let method = request.down_payment_method.unwrap_or(PaymentMethod::Cash);
            self.payments
                .insert(
                    &mut tx,
                    sale_id,
                    request.down_payment,
                    method,
                    request.down_payment_proof.as_deref(),
                )
                .await?;
        }

        self.sales.update(&mut tx, &sale).await?;

        tx.commit().await?;

        info!(
            sale_id,
            installments = lines.len(),
            "Credit sale finalized with installment plan"
        );

        self.plans.list_for_sale(sale_id).await
    }

    pub async fn list_plan(&self, sale_id: i64) -> Result<Vec<PlanEntry>> {
        self.sales
            .find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {}", sale_id)))?;

        self.plans.list_for_sale(sale_id).await
    }

    /// Pay one installment in full. Settling the last pending entry promotes
    /// the sale to Paid.
    pub async fn pay_installment(
        &self,
        sale_id: i64,
        sequence: i32,
        request: PayInstallmentRequest,
    ) -> Result<PlanEntry> {
        let mut tx = self.pool.begin().await?;

        let mut sale = self.sales.lock_for_update(&mut tx, sale_id).await?;

        match sale.status {
            SaleStatus::Credit | SaleStatus::HasReturn => {}
            other => {
                return Err(AppError::validation(format!(
                    "A {} sale has no payable installments",
                    other
                )))
            }
        }

        let entry = self
            .plans
            .lock_by_sequence(&mut tx, sale_id, sequence)
            .await?;

        if entry.status == EntryStatus::Paid {
            return Err(AppError::validation(format!(
                "Installment {} is already paid",
                sequence
            )));
        }

        let payment_id = self
            .payments
            .insert(
                &mut tx,
                sale_id,
                entry.total_due,
                request.method,
                request.proof_path.as_deref(),
            )
            .await?;

        self.plans.mark_paid(&mut tx, entry.id, payment_id).await?;

        let pending = self.plans.count_pending(&mut tx, sale_id).await?;
        if pending == 0 && sale.status == SaleStatus::Credit {
            let paid_total = self.payments.paid_total_tx(&mut tx, sale_id).await?;
            sale.mark_paid(paid_total)?;
            self.sales.update(&mut tx, &sale).await?;
        }

        tx.commit().await?;

        info!(sale_id, sequence, payment_id, "Installment paid");

        let entries = self.plans.list_for_sale(sale_id).await?;
        entries
            .into_iter()
            .find(|e| e.sequence == sequence)
            .ok_or_else(|| AppError::internal("Installment vanished after update"))
    }
}
