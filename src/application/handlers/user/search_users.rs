//! SearchUsersHandler - filtered, paginated directory listing.

use std::sync::Arc;
use std::time::Duration;

use super::UserDetails;
use crate::application::handlers::side_effects::{picture_url, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::foundation::{Page, Pagination};
use crate::domain::user::UserError;
use crate::ports::{IdentityProvider, UserRepository, UserSearch};

#[derive(Debug, Clone, Default)]
pub struct SearchUsersQuery {
    pub filter: UserSearch,
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct SearchUsersResult {
    pub users: Page<UserDetails>,
}

pub struct SearchUsersHandler {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
    lookup_timeout: Duration,
}

impl SearchUsersHandler {
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

    pub async fn handle(&self, query: SearchUsersQuery) -> Result<SearchUsersResult, UserError> {
        let mut filter = query.filter;
        filter.name = filter
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let page = self.users.search(&filter, query.pagination).await?;

        let mut items = Vec::with_capacity(page.items.len());
        for user in &page.items {
            let picture_url = picture_url(self.identity.as_ref(), self.lookup_timeout, &user.id).await;
            items.push(UserDetails {
                user: user.clone(),
                picture_url,
            });
        }

        Ok(SearchUsersResult {
            users: Page::new(
                items,
                Pagination::new(page.page, page.page_size),
                page.total_rows,
            ),
        })
    }
}
