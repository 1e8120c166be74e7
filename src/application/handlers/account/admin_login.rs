//! AdminLoginHandler - exchanges admin credentials for a signed token.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::domain::admin::{normalize_email, AdminClaims, AdminError};
use crate::domain::foundation::Timestamp;
use crate::ports::{AdminRepository, SecretHasher, TokenIssuer};

/// Lifetime of an admin session token.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug)]
pub struct AdminLoginCommand {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct AdminLoginResult {
    pub token: String,
    pub claims: AdminClaims,
}

pub struct AdminLoginHandler {
    admins: Arc<dyn AdminRepository>,
    hasher: Arc<dyn SecretHasher>,
    tokens: Arc<dyn TokenIssuer>,
    token_ttl_hours: i64,
}

impl AdminLoginHandler {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        hasher: Arc<dyn SecretHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            admins,
            hasher,
            tokens,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }

    pub fn with_token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = hours;
        self
    }

    pub async fn handle(&self, cmd: AdminLoginCommand) -> Result<AdminLoginResult, AdminError> {
        let email = normalize_email(&cmd.email)?;

        let admin = self
            .admins
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AdminError::not_found(email.clone()))?;

        if !self
            .hasher
            .verify(cmd.password.expose_secret(), &admin.password_hash)?
        {
            tracing::info!(admin_id = %admin.id, "Admin login rejected");
            return Err(AdminError::InvalidPassword);
        }

        let claims = AdminClaims::new(admin.id, Timestamp::now(), self.token_ttl_hours);
        let token = self.tokens.issue(&claims).map_err(|err| {
            tracing::error!(admin_id = %admin.id, error = %err, "Unable to sign admin token");
            AdminError::from(err)
        })?;

        tracing::info!(admin_id = %admin.id, "Admin logged in");
        Ok(AdminLoginResult { token, claims })
    }
}
