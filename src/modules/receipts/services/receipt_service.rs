use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::receipts::services::artifact::ArtifactRenderer;
use crate::modules::receipts::services::receipt_builder::build_receipt_html;
use crate::modules::sales::repositories::{PaymentRepository, SaleRepository};
use crate::modules::settings::repositories::SettingsRepository;

/// Generated receipt artifact
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptArtifact {
    pub sale_id: i64,
    pub path: String,
}

/// Builds receipt documents for sales and hands them to the renderer
pub struct ReceiptService {
    sales: SaleRepository,
    payments: PaymentRepository,
    customers: CustomerRepository,
    settings: SettingsRepository,
    renderer: Arc<dyn ArtifactRenderer>,
}

impl ReceiptService {
    pub fn new(
        sales: SaleRepository,
        payments: PaymentRepository,
        customers: CustomerRepository,
        settings: SettingsRepository,
        renderer: Arc<dyn ArtifactRenderer>,
    ) -> Self {
        Self {
            sales,
            payments,
            customers,
            settings,
            renderer,
        }
    }

    pub async fn generate_receipt(&self, sale_id: i64) -> Result<ReceiptArtifact> {
        let sale = self
            .sales
            .find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sale {}", sale_id)))?;

        let customer = self
            .customers
            .find_by_id(sale.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {}", sale.customer_id)))?;

        let settings = self.settings.load().await?;
        let line_items = self.sales.line_items(sale_id).await?;
        let payments = self.payments.list_for_sale(sale_id).await?;
        let paid_total = self.payments.paid_total(sale_id).await?;

        let html = build_receipt_html(
            &settings,
            &customer,
            &sale,
            &line_items,
            &payments,
            paid_total,
        );

        let path = self
            .renderer
            .render(&html, &format!("receipt_sale_{}", sale_id))
            .await?;

        info!(sale_id, path = %path, "Receipt generated");

        Ok(ReceiptArtifact { sale_id, path })
    }
}
