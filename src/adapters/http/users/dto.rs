//! HTTP DTOs for user directory and follow graph endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::user::{Coordinates, Interest, User, UserPatch};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of `GET /users`.
///
/// When `nickname` is set the other filters are ignored and a single user
/// is returned.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQuery {
    pub nickname: Option<String>,
    pub name: Option<String>,
    pub is_verified: Option<bool>,
    pub disabled: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClosestQuery {
    /// Search radius in kilometres.
    pub km: f64,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowQuery {
    #[serde(alias = "followerID")]
    pub follower_id: String,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub nickname: Option<String>,
    pub display_name: Option<String>,
    pub is_male: Option<bool>,
    pub birth_date: Option<DateTime<Utc>>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub interests: Option<Vec<String>>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = ValidationError;

    fn try_from(request: UpdateUserRequest) -> Result<Self, Self::Error> {
        let coordinates = Coordinates::from_pair(request.latitude, request.longitude)?;
        let interests = request
            .interests
            .map(|raw| Interest::parse_all(&raw))
            .transpose()?;

        Ok(UserPatch {
            nickname: request.nickname,
            display_name: request.display_name,
            is_male: request.is_male,
            born_at: request.birth_date.map(Timestamp::from_datetime),
            height: request.height,
            weight: request.weight,
            coordinates,
            interests,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowResponse {
    /// False when the edge already existed.
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnfollowResponse {
    /// False when there was no edge to remove.
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub user: User,
    pub repaired: bool,
}
