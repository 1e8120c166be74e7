//! Client-reported events that only feed metrics.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::side_effects::{emit_metric, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::metrics::{LoginMethod, MetricEvent};
use crate::domain::user::UserError;
use crate::ports::MetricsSink;

#[derive(Debug, Clone)]
pub struct NotifyLoginCommand {
    /// `mail` or `federated_entity`.
    pub method: String,
}

pub struct NotifyLoginHandler {
    metrics: Arc<dyn MetricsSink>,
    side_effect_timeout: Duration,
}

impl NotifyLoginHandler {
    pub fn new(metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            metrics,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    pub async fn handle(&self, cmd: NotifyLoginCommand) -> Result<(), UserError> {
        let method: LoginMethod = cmd.method.trim().parse()?;
        emit_metric(
            self.metrics.as_ref(),
            self.side_effect_timeout,
            MetricEvent::Login(method),
        )
        .await;
        Ok(())
    }
}

pub struct NotifyPasswordRecoverHandler {
    metrics: Arc<dyn MetricsSink>,
    side_effect_timeout: Duration,
}

impl NotifyPasswordRecoverHandler {
    pub fn new(metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            metrics,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    pub async fn handle(&self) {
        emit_metric(
            self.metrics.as_ref(),
            self.side_effect_timeout,
            MetricEvent::PasswordRecover,
        )
        .await;
    }
}
