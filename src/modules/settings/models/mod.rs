pub mod store_settings;

pub use store_settings::{InterestRates, StoreSettings, UpdateProfileRequest, UpdateRatesRequest};
