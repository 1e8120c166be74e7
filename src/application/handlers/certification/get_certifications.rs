//! GetCertificationsHandler - lists certifications with their owners.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::side_effects::{lookup_url, DEFAULT_SIDE_EFFECT_TIMEOUT};
use crate::domain::certification::{Certification, CertificationError, CertificationFilter};
use crate::domain::foundation::{Page, Pagination};
use crate::ports::{CertificationRepository, IdentityProvider, UserRepository};

use super::CertificationDetails;

#[derive(Debug, Clone, Default)]
pub struct GetCertificationsQuery {
    pub filter: CertificationFilter,
    pub pagination: Pagination,
}

#[derive(Debug, Clone)]
pub struct GetCertificationsResult {
    pub certifications: Page<CertificationDetails>,
}

/// Filtered, paginated certification listing.
///
/// Owner profile and video URL are enrichment only: a lookup failure
/// leaves the field empty instead of failing the listing.
pub struct GetCertificationsHandler {
    users: Arc<dyn UserRepository>,
    certifications: Arc<dyn CertificationRepository>,
    identity: Arc<dyn IdentityProvider>,
    lookup_timeout: Duration,
}

impl GetCertificationsHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        certifications: Arc<dyn CertificationRepository>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            users,
            certifications,
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
        query: GetCertificationsQuery,
    ) -> Result<GetCertificationsResult, CertificationError> {
        let page = self
            .certifications
            .list(&query.filter, query.pagination)
            .await?;

        let mut items = Vec::with_capacity(page.items.len());
        for certification in &page.items {
            items.push(self.enrich(certification.clone()).await);
        }

        Ok(GetCertificationsResult {
            certifications: Page {
                items,
                page: page.page,
                page_size: page.page_size,
                total_rows: page.total_rows,
            },
        })
    }

    async fn enrich(&self, certification: Certification) -> CertificationDetails {
        let user = match self.users.find_by_id(&certification.user_id).await {
            Ok(user) => user.map(|u| u.public_profile(None)),
            Err(error) => {
                tracing::warn!(
                    certification_id = %certification.id,
                    error = %error,
                    "Failed to load certification owner"
                );
                None
            }
        };
        let video_url = lookup_url(
            self.lookup_timeout,
            &certification.user_id,
            self.identity
                .get_certification_video_url(&certification.user_id),
        )
        .await;

        CertificationDetails {
            certification,
            user,
            video_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user_id, World};
    use crate::domain::certification::CertificationStatus;

    fn handler(world: &World) -> GetCertificationsHandler {
        GetCertificationsHandler::new(
            world.directory.clone(),
            world.certifications.clone(),
            world.identity.clone(),
        )
    }

    async fn seed(world: &World) {
        world.with_user("u1", "runner").await;
        world.with_user("u2", "lifter").await;
        let mut denied = Certification::request(user_id("u1"));
        denied.apply_status(CertificationStatus::Denied).unwrap();
        world.certifications.create(&denied).await.unwrap();
        world
            .certifications
            .create(&Certification::request(user_id("u1")))
            .await
            .unwrap();
        world
            .certifications
            .create(&Certification::request(user_id("u2")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn lists_all_with_owner_and_video() {
        let world = World::new();
        seed(&world).await;

        let result = handler(&world)
            .handle(GetCertificationsQuery::default())
            .await
            .unwrap();

        assert_eq!(result.certifications.total_rows, 3);
        for details in &result.certifications.items {
            let owner = details.user.as_ref().unwrap();
            assert_eq!(owner.id, details.certification.user_id);
            assert!(details.video_url.as_ref().unwrap().ends_with("certification.mp4"));
        }
    }

    #[tokio::test]
    async fn filters_by_user_and_status() {
        let world = World::new();
        seed(&world).await;

        let result = handler(&world)
            .handle(GetCertificationsQuery {
                filter: CertificationFilter {
                    user_id: Some(user_id("u1")),
                    status: Some(CertificationStatus::Pending),
                },
                pagination: Pagination::default(),
            })
            .await
            .unwrap();

        assert_eq!(result.certifications.total_rows, 1);
        assert!(result.certifications.items[0].certification.is_pending());
    }

    #[tokio::test]
    async fn paginates() {
        let world = World::new();
        seed(&world).await;

        let result = handler(&world)
            .handle(GetCertificationsQuery {
                filter: CertificationFilter::default(),
                pagination: Pagination::new(2, 2),
            })
            .await
            .unwrap();

        assert_eq!(result.certifications.items.len(), 1);
        assert_eq!(result.certifications.total_rows, 3);
    }

    #[tokio::test]
    async fn missing_owner_leaves_user_empty() {
        let world = World::new();
        world
            .certifications
            .create(&Certification::request(user_id("orphan")))
            .await
            .unwrap();

        let result = handler(&world)
            .handle(GetCertificationsQuery::default())
            .await
            .unwrap();

        assert_eq!(result.certifications.items[0].user, None);
    }
}
