//! EnableUserHandler / DisableUserHandler - block and unblock accounts.
//!
//! The identity provider is told first so a blocked user cannot log in
//! even if the local write fails afterwards.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::side_effects::{emit_metric, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::foundation::UserId;
use crate::domain::metrics::MetricEvent;
use crate::domain::user::{User, UserError};
use crate::ports::{IdentityProvider, MetricsSink, UserRepository};

#[derive(Debug, Clone)]
pub struct SetUserAccessCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct SetUserAccessResult {
    pub user: User,
}

pub struct DisableUserHandler {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
    metrics: Arc<dyn MetricsSink>,
    side_effect_timeout: Duration,
}

impl DisableUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        identity: Arc<dyn IdentityProvider>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            users,
            identity,
            metrics,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    pub async fn handle(&self, cmd: SetUserAccessCommand) -> Result<SetUserAccessResult, UserError> {
        let mut user = load(self.users.as_ref(), &cmd.user_id).await?;
        user.disable()?;

        self.identity.disable_user(&user.id).await?;
        if let Err(err) = self.users.set_disabled(&user.id, true).await {
            tracing::error!(user_id = %user.id, error = %err, "Failed to persist disabled flag");
            return Err(err.into());
        }

        tracing::info!(user_id = %user.id, "User disabled");
        emit_metric(
            self.metrics.as_ref(),
            self.side_effect_timeout,
            MetricEvent::Blocked,
        )
        .await;

        Ok(SetUserAccessResult { user })
    }
}

pub struct EnableUserHandler {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl EnableUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { users, identity }
    }

    pub async fn handle(&self, cmd: SetUserAccessCommand) -> Result<SetUserAccessResult, UserError> {
        let mut user = load(self.users.as_ref(), &cmd.user_id).await?;
        user.enable()?;

        self.identity.enable_user(&user.id).await?;
        if let Err(err) = self.users.set_disabled(&user.id, false).await {
            tracing::error!(user_id = %user.id, error = %err, "Failed to persist enabled flag");
            return Err(err.into());
        }

        tracing::info!(user_id = %user.id, "User enabled");
        Ok(SetUserAccessResult { user })
    }
}

async fn load(users: &dyn UserRepository, id: &UserId) -> Result<User, UserError> {
    users
        .find_by_id(id)
        .await?
        .ok_or_else(|| UserError::not_found(id.clone()))
}
