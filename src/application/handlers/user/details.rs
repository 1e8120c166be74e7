use serde::Serialize;

use crate::domain::user::User;

/// A full profile with its resolved picture URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub picture_url: Option<String>,
}
