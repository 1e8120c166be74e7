//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FIUFIT_USERS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use fiufit_users::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod security;
mod server;
mod services;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use security::{SecurityConfig, VerificationConfig};
pub use server::{Environment, ServerConfig};
pub use services::{IdentityConfig, MessagingConfig, ServiceEndpointConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Only `security.jwt_secret` is mandatory; every other section has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Identity provider and media bucket
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Push notification service
    #[serde(default)]
    pub notifications: ServiceEndpointConfig,

    /// Business metrics service
    #[serde(default)]
    pub metrics: ServiceEndpointConfig,

    /// Twilio WhatsApp pin delivery
    #[serde(default)]
    pub messaging: MessagingConfig,

    /// Administrator tokens
    pub security: SecurityConfig,

    /// Phone verification pins
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FIUFIT_USERS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FIUFIT_USERS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `FIUFIT_USERS__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FIUFIT_USERS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;
        self.server.validate()?;
        self.database.validate()?;
        self.identity.validate(environment)?;
        self.notifications
            .validate("notifications.base_url", environment)?;
        self.metrics.validate("metrics.base_url", environment)?;
        self.messaging.validate()?;
        self.security.validate()?;
        self.verification.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const SECRET: &str = "a-signing-key-that-is-long-enough-for-hs256";

    fn set_minimal_env() {
        env::set_var("FIUFIT_USERS__SECURITY__JWT_SECRET", SECRET);
    }

    fn clear_env() {
        for name in [
            "FIUFIT_USERS__SECURITY__JWT_SECRET",
            "FIUFIT_USERS__SERVER__PORT",
            "FIUFIT_USERS__SERVER__ENVIRONMENT",
            "FIUFIT_USERS__DATABASE__URL",
            "FIUFIT_USERS__VERIFICATION__PIN_TTL_SECS",
            "FIUFIT_USERS__METRICS__BASE_URL",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var(
            "FIUFIT_USERS__DATABASE__URL",
            "postgresql://test@localhost/fiufit",
        );
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgresql://test@localhost/fiufit")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_jwt_secret_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_defaults_select_in_memory_collaborators() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(!config.database.is_configured());
        assert!(!config.identity.is_configured());
        assert!(!config.metrics.is_configured());
        assert!(!config.messaging.is_configured());
        assert_eq!(config.verification.pin_ttl_secs, 300);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FIUFIT_USERS__SERVER__PORT", "3000");
        env::set_var("FIUFIT_USERS__VERIFICATION__PIN_TTL_SECS", "120");
        env::set_var("FIUFIT_USERS__METRICS__BASE_URL", "http://metrics.local");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.verification.pin_ttl_secs, 120);
        assert!(config.metrics.is_configured());
    }

    #[test]
    fn test_production_rejects_plain_http_collaborators() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("FIUFIT_USERS__SERVER__ENVIRONMENT", "production");
        env::set_var("FIUFIT_USERS__METRICS__BASE_URL", "http://metrics.local");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }
}
