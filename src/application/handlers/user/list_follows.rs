//! ListFollowsHandler - paginated followers / followed listings.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::side_effects::{picture_url, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::foundation::{Page, Pagination, UserId};
use crate::domain::user::{PublicProfile, UserError};
use crate::ports::{FollowRepository, IdentityProvider, UserRepository};

/// Which side of the edge set to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowDirection {
    /// Users following the subject.
    Followers,
    /// Users the subject follows.
    Followed,
}

#[derive(Debug, Clone)]
pub struct ListFollowsQuery {
    pub user_id: UserId,
    pub direction: FollowDirection,
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct ListFollowsResult {
    pub users: Page<PublicProfile>,
}

/// Serves both GetFollowers and GetFollowed; every entry carries a picture URL.
pub struct ListFollowsHandler {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    identity: Arc<dyn IdentityProvider>,
    lookup_timeout: Duration,
}

impl ListFollowsHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        follows: Arc<dyn FollowRepository>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            users,
            follows,
            identity,
            lookup_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub async fn handle(&self, query: ListFollowsQuery) -> Result<ListFollowsResult, UserError> {
        if self.users.find_by_id(&query.user_id).await?.is_none() {
            return Err(UserError::not_found(query.user_id));
        }

        let page = match query.direction {
            FollowDirection::Followers => {
                self.follows.followers(&query.user_id, query.pagination).await?
            }
            FollowDirection::Followed => {
                self.follows.followed(&query.user_id, query.pagination).await?
            }
        };

        let mut items = Vec::with_capacity(page.items.len());
        for user in &page.items {
            let picture = picture_url(self.identity.as_ref(), self.lookup_timeout, &user.id).await;
            items.push(user.public_profile(picture));
        }

        Ok(ListFollowsResult {
            users: Page {
                items,
                page: page.page,
                page_size: page.page_size,
                total_rows: page.total_rows,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user_id, World};
    use crate::domain::follow::FollowEdge;

    fn handler(world: &World) -> ListFollowsHandler {
        ListFollowsHandler::new(
            world.directory.clone(),
            world.directory.clone(),
            world.identity.clone(),
        )
    }

    async fn star_world() -> World {
        let world = World::new();
        world.with_user("star", "star").await;
        for (id, nick) in [("f1", "fan1"), ("f2", "fan2"), ("f3", "fan3")] {
            world.with_user(id, nick).await;
            world
                .directory
                .add(&FollowEdge::new(user_id(id), user_id("star")).unwrap())
                .await
                .unwrap();
        }
        world.identity.set_picture(&user_id("f1")).await;
        world
    }

    fn query(id: &str, direction: FollowDirection, pagination: Pagination) -> ListFollowsQuery {
        ListFollowsQuery {
            user_id: user_id(id),
            direction,
            pagination,
        }
    }

    #[tokio::test]
    async fn lists_followers_with_pictures() {
        let world = star_world().await;

        let result = handler(&world)
            .handle(query("star", FollowDirection::Followers, Pagination::default()))
            .await
            .unwrap();

        assert_eq!(result.users.total_rows, 3);
        let f1 = result.users.items.iter().find(|u| u.id == user_id("f1")).unwrap();
        assert!(f1.picture_url.as_ref().unwrap().ends_with("profile_pictures/f1/profile.png"));
        let f2 = result.users.items.iter().find(|u| u.id == user_id("f2")).unwrap();
        assert!(f2.picture_url.as_ref().unwrap().ends_with("profile_pictures/default.png"));
    }

    #[tokio::test]
    async fn paginates_followers() {
        let world = star_world().await;

        let result = handler(&world)
            .handle(query("star", FollowDirection::Followers, Pagination::new(2, 2)))
            .await
            .unwrap();

        assert_eq!(result.users.items.len(), 1);
        assert_eq!(result.users.page, 2);
    }

    #[tokio::test]
    async fn lists_followed() {
        let world = star_world().await;

        let result = handler(&world)
            .handle(query("f1", FollowDirection::Followed, Pagination::default()))
            .await
            .unwrap();

        assert_eq!(result.users.total_rows, 1);
        assert_eq!(result.users.items[0].id, user_id("star"));
    }

    #[tokio::test]
    async fn unknown_subject_is_not_found() {
        let world = World::new();
        let result = handler(&world)
            .handle(query("ghost", FollowDirection::Followers, Pagination::default()))
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
