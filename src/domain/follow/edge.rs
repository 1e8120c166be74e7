use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// A directed follow relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower_id: UserId,
    pub followed_id: UserId,
    pub created_at: Timestamp,
}

impl FollowEdge {
    /// Creates an edge, rejecting self-follows.
    pub fn new(follower_id: UserId, followed_id: UserId) -> Result<Self, ValidationError> {
        if follower_id == followed_id {
            return Err(ValidationError::invalid_format(
                "followed_id",
                "users cannot follow themselves",
            ));
        }
        Ok(Self {
            follower_id,
            followed_id,
            created_at: Timestamp::now(),
        })
    }

    /// True when both edges connect the same ordered pair.
    pub fn same_pair(&self, other: &FollowEdge) -> bool {
        self.follower_id == other.follower_id && self.followed_id == other.followed_id
    }
}
