//! Admin token and verification pin configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

const MIN_JWT_SECRET_BYTES: usize = 32;

/// Administrator session tokens
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// HMAC key used to sign admin tokens
    pub jwt_secret: SecretString,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl SecurityConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().len() < MIN_JWT_SECRET_BYTES {
            return Err(ValidationError::WeakJwtSecret(MIN_JWT_SECRET_BYTES));
        }
        if !(1..=720).contains(&self.token_ttl_hours) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

/// Phone verification pins
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    #[serde(default = "default_pin_ttl_secs")]
    pub pin_ttl_secs: i64,
}

impl VerificationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(30..=3600).contains(&self.pin_ttl_secs) {
            return Err(ValidationError::InvalidPinTtl);
        }
        Ok(())
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            pin_ttl_secs: default_pin_ttl_secs(),
        }
    }
}

fn default_token_ttl_hours() -> i64 {
    crate::application::handlers::account::DEFAULT_TOKEN_TTL_HOURS
}

fn default_pin_ttl_secs() -> i64 {
    crate::domain::verification::DEFAULT_PIN_TTL_SECS
}
