//! FollowUserHandler - adds a follower -> followed edge.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::side_effects::{
    best_effort, emit_metric, DEFAULT_SIDE_EFFECT_TIMEOUT,
};
use crate::domain::follow::FollowEdge;
use crate::domain::foundation::UserId;
use crate::domain::metrics::MetricEvent;
use crate::domain::user::UserError;
use crate::ports::{FollowRepository, MetricsSink, NotificationSink, UserRepository};

#[derive(Debug, Clone)]
pub struct FollowUserCommand {
    pub followed_id: UserId,
    pub follower_id: UserId,
}

#[derive(Debug, Clone)]
pub struct FollowUserResult {
    /// False when the edge already existed.
    pub created: bool,
}

/// Following is idempotent: a repeat follow neither duplicates the edge
/// nor notifies again.
pub struct FollowUserHandler {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    notifications: Arc<dyn NotificationSink>,
    metrics: Arc<dyn MetricsSink>,
    side_effect_timeout: Duration,
}

impl FollowUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        follows: Arc<dyn FollowRepository>,
        notifications: Arc<dyn NotificationSink>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            users,
            follows,
            notifications,
            metrics,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    pub async fn handle(&self, cmd: FollowUserCommand) -> Result<FollowUserResult, UserError> {
        let edge = FollowEdge::new(cmd.follower_id.clone(), cmd.followed_id.clone())?;

        let followed = self
            .users
            .find_by_id(&cmd.followed_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.followed_id.clone()))?;
        let follower = self
            .users
            .find_by_id(&cmd.follower_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.follower_id.clone()))?;

        let created = self.follows.add(&edge).await?;
        if !created {
            tracing::debug!(
                follower_id = %follower.id,
                followed_id = %followed.id,
                "Follow already exists"
            );
            return Ok(FollowUserResult { created });
        }

        tracing::info!(
            follower_id = %follower.id,
            followed_id = %followed.id,
            "User followed"
        );

        best_effort(
            self.side_effect_timeout,
            "follow_notification",
            self.notifications
                .send_follow_notification(&follower, &followed),
        )
        .await;
        emit_metric(
            self.metrics.as_ref(),
            self.side_effect_timeout,
            MetricEvent::UserFollowed(followed.id.clone()),
        )
        .await;

        Ok(FollowUserResult { created })
    }
}
