//! UnfollowUserHandler - removes a follower -> followed edge.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::{FollowRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct UnfollowUserCommand {
    pub followed_id: UserId,
    pub follower_id: UserId,
}

#[derive(Debug, Clone)]
pub struct UnfollowUserResult {
    /// False when there was no edge to remove.
    pub removed: bool,
}

/// Removing a missing edge succeeds; unknown users do not.
pub struct UnfollowUserHandler {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
}

impl UnfollowUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, follows: Arc<dyn FollowRepository>) -> Self {
        Self { users, follows }
    }

    pub async fn handle(&self, cmd: UnfollowUserCommand) -> Result<UnfollowUserResult, UserError> {
        for id in [&cmd.followed_id, &cmd.follower_id] {
            if self.users.find_by_id(id).await?.is_none() {
                return Err(UserError::not_found(id.clone()));
            }
        }

        let removed = self
            .follows
            .remove(&cmd.follower_id, &cmd.followed_id)
            .await?;

        tracing::info!(
            follower_id = %cmd.follower_id,
            followed_id = %cmd.followed_id,
            removed,
            "User unfollowed"
        );

        Ok(UnfollowUserResult { removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user_id, World};
    use crate::domain::follow::FollowEdge;

    fn handler(world: &World) -> UnfollowUserHandler {
        UnfollowUserHandler::new(world.directory.clone(), world.directory.clone())
    }

    fn cmd(follower: &str, followed: &str) -> UnfollowUserCommand {
        UnfollowUserCommand {
            followed_id: user_id(followed),
            follower_id: user_id(follower),
        }
    }

    #[tokio::test]
    async fn removes_existing_edge() {
        let world = World::new();
        world.with_user("a", "alice").await;
        world.with_user("b", "bob").await;
        world
            .directory
            .add(&FollowEdge::new(user_id("a"), user_id("b")).unwrap())
            .await
            .unwrap();

        let result = handler(&world).handle(cmd("a", "b")).await.unwrap();

        assert!(result.removed);
        assert_eq!(world.directory.edge_count().await, 0);
    }

    #[tokio::test]
    async fn missing_edge_is_no_op() {
        let world = World::new();
        world.with_user("a", "alice").await;
        world.with_user("b", "bob").await;

        let result = handler(&world).handle(cmd("a", "b")).await.unwrap();

        assert!(!result.removed);
    }

    #[tokio::test]
    async fn only_removes_given_direction() {
        let world = World::new();
        world.with_user("a", "alice").await;
        world.with_user("b", "bob").await;
        world
            .directory
            .add(&FollowEdge::new(user_id("b"), user_id("a")).unwrap())
            .await
            .unwrap();

        let result = handler(&world).handle(cmd("a", "b")).await.unwrap();

        assert!(!result.removed);
        assert_eq!(world.directory.edge_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let world = World::new();
        world.with_user("a", "alice").await;

        let result = handler(&world).handle(cmd("a", "ghost")).await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
