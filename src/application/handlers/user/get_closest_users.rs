//! GetClosestUsersHandler - users within a radius of the caller.

use std::sync::Arc;
use std::time::Duration;

use super::UserDetails;
use crate::application::handlers::side_effects::{picture_url, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::foundation::{Page, Pagination, UserId};
use crate::domain::user::UserError;
use crate::ports::{IdentityProvider, UserRepository};

#[derive(Debug, Clone)]
pub struct GetClosestUsersQuery {
    pub user_id: UserId,
    pub radius_km: f64,
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct GetClosestUsersResult {
    pub users: Page<UserDetails>,
}

/// Orders by distance from the caller's stored coordinates; the caller is never listed.
pub struct GetClosestUsersHandler {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
    lookup_timeout: Duration,
}

impl GetClosestUsersHandler {
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

    pub async fn handle(
        &self,
        query: GetClosestUsersQuery,
    ) -> Result<GetClosestUsersResult, UserError> {
        if !query.radius_km.is_finite() || query.radius_km <= 0.0 {
            return Err(UserError::validation("km", "must be a positive distance"));
        }

        let caller = self
            .users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| UserError::not_found(query.user_id.clone()))?;

        let page = self
            .users
            .find_closest(&caller.id, caller.coordinates, query.radius_km, query.pagination)
            .await?;

        let mut items = Vec::with_capacity(page.items.len());
        for user in &page.items {
            let picture_url = picture_url(self.identity.as_ref(), self.lookup_timeout, &user.id).await;
            items.push(UserDetails {
                user: user.clone(),
                picture_url,
            });
        }

        Ok(GetClosestUsersResult {
            users: Page::new(
                items,
                Pagination::new(page.page, page.page_size),
                page.total_rows,
            ),
        })
    }
}
