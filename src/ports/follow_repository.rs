//! Follow graph storage port.

use async_trait::async_trait;

use crate::domain::follow::FollowEdge;
use crate::domain::foundation::{DomainError, Page, Pagination, UserId};
use crate::domain::user::User;

/// Storage for directed follow edges.
///
/// Implementations must keep at most one edge per ordered pair.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Inserts the edge unless it already exists.
    ///
    /// Returns `true` when a new edge was written.
    async fn add(&self, edge: &FollowEdge) -> Result<bool, DomainError>;

    /// Deletes the edge if present.
    ///
    /// Returns `true` when an edge was removed.
    async fn remove(&self, follower_id: &UserId, followed_id: &UserId) -> Result<bool, DomainError>;

    /// Users following `user_id`, newest edge first.
    async fn followers(
        &self,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError>;

    /// Users `user_id` follows, newest edge first.
    async fn followed(
        &self,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FollowRepository) {}
    }
}
