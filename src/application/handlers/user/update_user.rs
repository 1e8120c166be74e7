//! UpdateUserHandler - partial profile update.
//!
//! Loads the profile, applies the patch and writes back the profile fields.
//! The trainer and disabled flags belong to other workflows and are never
//! written here. A new nickname is checked against the directory before
//! the write; storage uniqueness still has the final say.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::side_effects::{emit_metric, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::foundation::UserId;
use crate::domain::metrics::MetricEvent;
use crate::domain::user::{User, UserError, UserPatch};
use crate::ports::{MetricsSink, UserRepository};

#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub patch: UserPatch,
}

#[derive(Debug, Clone)]
pub struct UpdateUserResult {
    pub user: User,
}

pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
    metrics: Arc<dyn MetricsSink>,
    side_effect_timeout: Duration,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            users,
            metrics,
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_side_effect_timeout(mut self, timeout: Duration) -> Self {
        self.side_effect_timeout = timeout;
        self
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<UpdateUserResult, UserError> {
        // 1. Load
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(cmd.user_id.clone()))?;

        // 2. Mutate
        let outcome = user.apply_patch(cmd.patch)?;

        // 3. Nickname must stay unique
        if outcome.nickname_changed {
            if let Some(other) = self.users.find_by_nickname(&user.nickname).await? {
                if other.id != user.id {
                    return Err(UserError::nickname_taken(user.nickname));
                }
            }
        }

        // 4. Write back
        self.users.update_profile(&user).await?;

        tracing::info!(
            user_id = %user.id,
            nickname_changed = outcome.nickname_changed,
            location_changed = outcome.location_changed,
            "User updated"
        );

        if outcome.location_changed {
            emit_metric(
                self.metrics.as_ref(),
                self.side_effect_timeout,
                MetricEvent::Location(user.coordinates),
            )
            .await;
        }

        Ok(UpdateUserResult { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user_id, ApprovingOnReadRepository, World};
    use crate::domain::user::{Coordinates, Interest};

    fn handler(world: &World) -> UpdateUserHandler {
        UpdateUserHandler::new(world.directory.clone(), world.metrics.clone())
    }

    fn cmd(id: &str, patch: UserPatch) -> UpdateUserCommand {
        UpdateUserCommand {
            user_id: user_id(id),
            patch,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn updates_profile_fields() {
        let world = World::new();
        world.with_user("u1", "runner").await;

        let patch = UserPatch {
            display_name: Some("Fast Runner".to_string()),
            weight: Some(72),
            interests: Some([Interest::Endurance].into_iter().collect()),
            ..Default::default()
        };
        let result = handler(&world).handle(cmd("u1", patch)).await.unwrap();

        assert_eq!(result.user.display_name, "Fast Runner");
        let stored = world.user("u1").await;
        assert_eq!(stored.weight, 72);
        assert!(stored.interests.contains(&Interest::Endurance));
        assert!(world.metrics.events().is_empty());
    }

    #[tokio::test]
    async fn location_change_emits_metric() {
        let world = World::new();
        world.with_user("u1", "runner").await;
        let coords = Coordinates::new(-31.4201, -64.1888).unwrap();

        handler(&world)
            .handle(cmd(
                "u1",
                UserPatch {
                    coordinates: Some(coords),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert_eq!(world.metrics.events(), vec![MetricEvent::Location(coords)]);
    }

    #[tokio::test]
    async fn keeps_fields_it_does_not_own() {
        let world = World::new();
        world.with_user("u1", "runner").await;
        world
            .directory
            .set_verified_trainer(&user_id("u1"), true)
            .await
            .unwrap();

        handler(&world)
            .handle(cmd(
                "u1",
                UserPatch {
                    nickname: Some("sprinter".to_string()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        let stored = world.user("u1").await;
        assert_eq!(stored.nickname, "sprinter");
        assert!(stored.is_verified_trainer);
    }

    #[tokio::test]
    async fn approval_landing_after_read_survives_the_write() {
        let world = World::new();
        world.with_user("u1", "runner").await;
        let users = Arc::new(ApprovingOnReadRepository::wrapping(world.directory.clone()));
        let handler = UpdateUserHandler::new(users, world.metrics.clone());

        let result = handler
            .handle(cmd(
                "u1",
                UserPatch {
                    display_name: Some("Night Runner".to_string()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert!(!result.user.is_verified_trainer);
        let stored = world.user("u1").await;
        assert_eq!(stored.display_name, "Night Runner");
        assert!(stored.is_verified_trainer);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn taken_nickname_is_conflict() {
        let world = World::new();
        world.with_user("u1", "runner").await;
        world.with_user("u2", "rower").await;

        let result = handler(&world)
            .handle(cmd(
                "u1",
                UserPatch {
                    nickname: Some("rower".to_string()),
                    ..Default::default()
                },
            ))
            .await;

        assert!(matches!(result, Err(UserError::NicknameTaken(n)) if n == "rower"));
        assert_eq!(world.user("u1").await.nickname, "runner");
    }

    #[tokio::test]
    async fn invalid_nickname_is_rejected() {
        let world = World::new();
        world.with_user("u1", "runner").await;

        let result = handler(&world)
            .handle(cmd(
                "u1",
                UserPatch {
                    nickname: Some("two words".to_string()),
                    ..Default::default()
                },
            ))
            .await;

        assert!(matches!(result, Err(UserError::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let world = World::new();
        let result = handler(&world).handle(cmd("ghost", UserPatch::default())).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
