//! GetUserHandler - loads one profile by id or nickname.

use std::sync::Arc;
use std::time::Duration;

use super::UserDetails;
use crate::application::handlers::side_effects::{picture_url, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::{IdentityProvider, UserRepository};

/// How the profile is addressed.
#[derive(Debug, Clone)]
pub enum GetUserQuery {
    ById(UserId),
    ByNickname(String),
}

#[derive(Debug, Clone)]
pub struct GetUserResult {
    pub user: UserDetails,
}

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
    lookup_timeout: Duration,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            users,
            identity,
            lookup_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
        }
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<GetUserResult, UserError> {
        let user = match query {
            GetUserQuery::ById(id) => self
                .users
                .find_by_id(&id)
                .await?
                .ok_or_else(|| UserError::not_found(id))?,
            GetUserQuery::ByNickname(nickname) => self
                .users
                .find_by_nickname(nickname.trim())
                .await?
                .ok_or_else(|| UserError::nickname_not_found(nickname))?,
        };

        let picture_url = picture_url(self.identity.as_ref(), self.lookup_timeout, &user.id).await;

        Ok(GetUserResult {
            user: UserDetails { user, picture_url },
        })
    }
}
