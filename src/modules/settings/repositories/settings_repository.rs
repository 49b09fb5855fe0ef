use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::settings::models::StoreSettings;

/// Repository for the store settings singleton row (seeded by migration)
pub struct SettingsRepository {
    pool: MySqlPool,
}

impl SettingsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn load(&self) -> Result<StoreSettings> {
        sqlx::query_as::<_, StoreSettings>(
            r#"
            SELECT id, store_name, logo_path, tax_id, phone, address, email,
                   daily_interest_pct, weekly_interest_pct, monthly_interest_pct,
                   return_window_days
            FROM store_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::internal("Store settings row is missing"))
    }

    pub async fn update_profile(
        &self,
        store_name: &str,
        logo_path: Option<&str>,
        tax_id: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        email: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE store_settings
            SET store_name = ?, logo_path = ?, tax_id = ?, phone = ?, address = ?, email = ?
            WHERE id = 1
            "#,
        )
        .bind(store_name)
        .bind(logo_path)
        .bind(tax_id)
        .bind(phone)
        .bind(address)
        .bind(email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_rates(
        &self,
        daily_pct: Decimal,
        weekly_pct: Decimal,
        monthly_pct: Decimal,
        return_window_days: i32,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE store_settings
            SET daily_interest_pct = ?, weekly_interest_pct = ?,
                monthly_interest_pct = ?, return_window_days = ?
            WHERE id = 1
            "#,
        )
        .bind(daily_pct)
        .bind(weekly_pct)
        .bind(monthly_pct)
        .bind(return_window_days)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
