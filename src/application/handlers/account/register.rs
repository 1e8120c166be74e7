//! RegisterHandler - creates the identity account for an email.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::side_effects::{emit_metric, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::admin::normalize_email;
use crate::domain::foundation::UserId;
use crate::domain::metrics::MetricEvent;
use crate::domain::user::UserError;
use crate::ports::{IdentityProvider, MetricsSink};

#[derive(Debug)]
pub struct RegisterCommand {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user_id: UserId,
}

/// Re-registering an email that was never verified hands back the same id.
pub struct RegisterHandler {
    identity: Arc<dyn IdentityProvider>,
    metrics: Arc<dyn MetricsSink>,
    side_effect_timeout: Duration,
}

impl RegisterHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            identity,
            metrics,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterResult, UserError> {
        let email = normalize_email(&cmd.email)?;
        if cmd.password.expose_secret().is_empty() {
            return Err(UserError::validation("password", "must not be empty"));
        }

        let user_id = self.identity.register(&email, &cmd.password).await?;
        tracing::info!(user_id = %user_id, "Identity account registered");

        emit_metric(
            self.metrics.as_ref(),
            self.side_effect_timeout,
            MetricEvent::Register,
        )
        .await;

        Ok(RegisterResult { user_id })
    }
}
