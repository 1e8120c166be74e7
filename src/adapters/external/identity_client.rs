//! Identity service client.
//!
//! Accounts live in the remote identity service; pictures and certification
//! videos live in its public media bucket under well-known object keys.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ensure_success, network_error};
use crate::adapters::storage_objects::{
    certification_video_object, object_url, picture_object, DEFAULT_PICTURE_OBJECT,
};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::IdentityProvider;

const SERVICE: &str = "identity";

#[derive(Debug, Clone)]
pub struct IdentityClientConfig {
    pub base_url: String,
    pub api_key: SecretString,
    pub storage_base_url: String,
}

pub struct HttpIdentityProvider {
    config: IdentityClientConfig,
    http_client: reqwest::Client,
}

impl HttpIdentityProvider {
    pub fn new(config: IdentityClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn account_url(&self, user_id: &UserId, suffix: &str) -> String {
        format!(
            "{}/accounts/{}{}",
            self.config.base_url.trim_end_matches('/'),
            user_id,
            suffix
        )
    }

    async fn post_action(&self, user_id: &UserId, action: &str) -> Result<(), DomainError> {
        let response = self
            .http_client
            .post(self.account_url(user_id, &format!("/{}", action)))
            .bearer_auth(self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| network_error(SERVICE, e))?;

        ensure_success(SERVICE, response).await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct RegisterResponse {
    user_id: String,
}

#[derive(Deserialize)]
struct AccountResponse {
    email_verified: bool,
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn register(&self, email: &str, password: &SecretString) -> Result<UserId, DomainError> {
        let url = format!("{}/accounts", self.config.base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&RegisterRequest {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await
            .map_err(|e| network_error(SERVICE, e))?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Err(DomainError::new(
                ErrorCode::UserAlreadyExists,
                "Email already registered",
            ));
        }

        let body: RegisterResponse = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::external(SERVICE, format!("Failed to parse response: {}", e)))?;

        Ok(UserId::new(body.user_id)?)
    }

    async fn delete_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        let response = self
            .http_client
            .delete(self.account_url(user_id, ""))
            .bearer_auth(self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| network_error(SERVICE, e))?;

        // Already gone is as good as deleted.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        ensure_success(SERVICE, response).await?;
        Ok(())
    }

    async fn enable_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.post_action(user_id, "enable").await
    }

    async fn disable_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.post_action(user_id, "disable").await
    }

    async fn user_is_verified(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let response = self
            .http_client
            .get(self.account_url(user_id, ""))
            .bearer_auth(self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| network_error(SERVICE, e))?;

        let account: AccountResponse = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::external(SERVICE, format!("Failed to parse response: {}", e)))?;

        Ok(account.email_verified)
    }

    async fn verify_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.post_action(user_id, "verify").await
    }

    async fn get_user_picture_url(&self, user_id: &UserId) -> Result<String, DomainError> {
        let url = object_url(&self.config.storage_base_url, &picture_object(user_id));

        let response = self
            .http_client
            .head(&url)
            .send()
            .await
            .map_err(|e| network_error("storage", e))?;

        if response.status().is_success() {
            Ok(url)
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(object_url(&self.config.storage_base_url, DEFAULT_PICTURE_OBJECT))
        } else {
            Err(DomainError::external(
                "storage",
                format!("HTTP {} probing {}", response.status().as_u16(), url),
            ))
        }
    }

    async fn get_certification_video_url(&self, user_id: &UserId) -> Result<String, DomainError> {
        Ok(object_url(
            &self.config.storage_base_url,
            &certification_video_object(user_id),
        ))
    }
}
