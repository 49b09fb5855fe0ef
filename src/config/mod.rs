use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Directory where generated receipt artifacts are written
    pub artifact_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Key material for the session cookie; must be at least 64 bytes
    pub session_secret: String,
}

/// Optional bootstrap administrator created at startup when the
/// ADMIN_EMAIL / ADMIN_PASSWORD / ADMIN_NAME variables are all present.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                artifact_dir: env::var("ARTIFACT_DIR")
                    .unwrap_or_else(|_| "artifacts".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                session_secret: env::var("SESSION_SECRET")
                    .map_err(|_| AppError::Configuration("SESSION_SECRET not set".to_string()))?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.session_secret.len() < 64 {
            return Err(AppError::Configuration(
                "SESSION_SECRET must be at least 64 bytes".to_string(),
            ));
        }

        if self.app.artifact_dir.trim().is_empty() {
            return Err(AppError::Configuration(
                "ARTIFACT_DIR must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Bootstrap administrator credentials, if fully configured
    pub fn admin_bootstrap(&self) -> Option<AdminBootstrap> {
        let name = env::var("ADMIN_NAME").ok()?;
        let email = env::var("ADMIN_EMAIL").ok()?;
        let password = env::var("ADMIN_PASSWORD").ok()?;

        Some(AdminBootstrap {
            name,
            email,
            password,
        })
    }
}
