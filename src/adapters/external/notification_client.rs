//! Push notification service client.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::{ensure_success, network_error};
use crate::domain::certification::CertificationStatus;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use crate::ports::NotificationSink;

const SERVICE: &str = "notifications";
const TITLE: &str = "FiuFit";

/// Body accepted by `POST /api/{version}/notifications/push`.
#[derive(Debug, Serialize, PartialEq)]
struct PushNotification {
    to_user_id: Vec<String>,
    title: &'static str,
    subtitle: &'static str,
    body: String,
    sound: &'static str,
    data: Value,
}

fn follow_notification(follower: &User, followed: &User) -> PushNotification {
    PushNotification {
        to_user_id: vec![followed.id.to_string()],
        title: TITLE,
        subtitle: "You have a new follower!",
        body: format!("{} is now following you!", follower.display_name),
        sound: "default",
        data: json!({
            "redirectTo": "User List",
            "params": {
                "title": "Followers",
                "showFollowers": true,
                "other": false,
                "forceRefresh": true,
            },
        }),
    }
}

fn certification_notification(user_id: &UserId, status: CertificationStatus) -> PushNotification {
    let (body, kind) = match status {
        CertificationStatus::Approved => (
            "Congratulations! Your profile is now verified",
            "VERIFICATION_APPROVED",
        ),
        _ => (
            "Your verification petition was denied. Please try again",
            "VERIFICATION_REJECTED",
        ),
    };

    PushNotification {
        to_user_id: vec![user_id.to_string()],
        title: TITLE,
        subtitle: "Your verification status has been updated",
        body: body.to_string(),
        sound: "default",
        data: json!({
            "redirectTo": "Profile Settings",
            "type": kind,
            "params": { "forceRefresh": true },
        }),
    }
}

pub struct HttpNotificationSink {
    push_url: String,
    http_client: reqwest::Client,
}

impl HttpNotificationSink {
    pub fn new(base_url: &str, api_version: &str) -> Self {
        Self {
            push_url: format!(
                "{}/api/{}/notifications/push",
                base_url.trim_end_matches('/'),
                api_version
            ),
            http_client: reqwest::Client::new(),
        }
    }

    async fn push(&self, notification: &PushNotification) -> Result<(), DomainError> {
        let response = self
            .http_client
            .post(&self.push_url)
            .json(notification)
            .send()
            .await
            .map_err(|e| network_error(SERVICE, e))?;

        ensure_success(SERVICE, response).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn send_follow_notification(
        &self,
        follower: &User,
        followed: &User,
    ) -> Result<(), DomainError> {
        self.push(&follow_notification(follower, followed)).await
    }

    async fn send_certification_outcome_notification(
        &self,
        user_id: &UserId,
        status: CertificationStatus,
    ) -> Result<(), DomainError> {
        self.push(&certification_notification(user_id, status)).await
    }
}
