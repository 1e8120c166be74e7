//! Remote collaborator configuration
//!
//! Every collaborator is optional. An absent base URL (or absent Twilio
//! credentials) selects the in-memory stand-in at startup.

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Identity provider (accounts service plus media bucket)
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub base_url: Option<String>,

    /// Service key sent on every call
    pub api_key: Option<SecretString>,

    /// Public base URL of the media bucket
    #[serde(default = "default_storage_base_url")]
    pub storage_base_url: String,
}

impl IdentityConfig {
    pub fn is_configured(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if let Some(url) = self.base_url.as_deref() {
            check_url("identity.base_url", url, environment)?;
            if self.api_key.is_none() {
                return Err(ValidationError::MissingRequired("identity.api_key"));
            }
        }
        check_url("identity.storage_base_url", &self.storage_base_url, environment)
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            storage_base_url: default_storage_base_url(),
        }
    }
}

/// Push notification or metrics service
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEndpointConfig {
    pub base_url: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl ServiceEndpointConfig {
    pub fn is_configured(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    pub fn validate(
        &self,
        name: &'static str,
        environment: &Environment,
    ) -> Result<(), ValidationError> {
        match self.base_url.as_deref() {
            Some(url) => check_url(name, url, environment),
            None => Ok(()),
        }
    }
}

impl Default for ServiceEndpointConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_version: default_api_version(),
        }
    }
}

/// Verification pin delivery
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagingConfig {
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<SecretString>,

    /// Sender number in E.164 form
    pub twilio_from_number: Option<String>,
}

impl MessagingConfig {
    pub fn is_configured(&self) -> bool {
        self.twilio_account_sid.is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_configured() {
            return Ok(());
        }
        if self.twilio_auth_token.is_none() {
            return Err(ValidationError::MissingRequired("messaging.twilio_auth_token"));
        }
        match self.twilio_from_number.as_deref() {
            None => Err(ValidationError::MissingRequired("messaging.twilio_from_number")),
            Some(number) if !is_e164(number) => {
                Err(ValidationError::InvalidPhoneNumber("messaging.twilio_from_number"))
            }
            Some(_) => Ok(()),
        }
    }
}

fn is_e164(number: &str) -> bool {
    let digits = number.strip_prefix('+').unwrap_or_default();
    (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

fn check_url(
    name: &'static str,
    url: &str,
    environment: &Environment,
) -> Result<(), ValidationError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidUrl(name));
    }
    if *environment == Environment::Production && !url.starts_with("https://") {
        return Err(ValidationError::MustBeHttps(name));
    }
    Ok(())
}

fn default_storage_base_url() -> String {
    "https://storage.googleapis.com/fiufit".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}
