use crate::core::{AppError, Result};
use crate::modules::settings::models::{
    InterestRates, StoreSettings, UpdateProfileRequest, UpdateRatesRequest,
};
use crate::modules::settings::repositories::SettingsRepository;

/// Business logic for store configuration
pub struct SettingsService {
    repo: SettingsRepository,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository) -> Self {
        Self { repo }
    }

    pub async fn get_settings(&self) -> Result<StoreSettings> {
        self.repo.load().await
    }

    pub async fn update_profile(&self, request: UpdateProfileRequest) -> Result<StoreSettings> {
        if request.store_name.trim().is_empty() {
            return Err(AppError::validation("Store name is required"));
        }

        self.repo
            .update_profile(
                &request.store_name,
                request.logo_path.as_deref(),
                request.tax_id.as_deref(),
                request.phone.as_deref(),
                request.address.as_deref(),
                request.email.as_deref(),
            )
            .await?;

        self.repo.load().await
    }

    pub async fn update_rates(&self, request: UpdateRatesRequest) -> Result<StoreSettings> {
        let rates = InterestRates {
            daily_pct: request.daily_interest_pct,
            weekly_pct: request.weekly_interest_pct,
            monthly_pct: request.monthly_interest_pct,
        };
        rates.validate()?;

        if request.return_window_days < 0 {
            return Err(AppError::validation(
                "Return window cannot be negative",
            ));
        }

        self.repo
            .update_rates(
                request.daily_interest_pct,
                request.weekly_interest_pct,
                request.monthly_interest_pct,
                request.return_window_days,
            )
            .await?;

        self.repo.load().await
    }
}
