//! Recording collaborators.
//!
//! Stand-ins for the notification, metrics and messaging services when
//! their URLs are not configured. Every call is logged and kept so tests
//! can assert on it.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::certification::CertificationStatus;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::metrics::MetricEvent;
use crate::domain::user::User;
use crate::domain::verification::PinCode;
use crate::ports::{MessagingChannel, MetricsSink, NotificationSink};

/// A notification captured by [`RecordingNotificationSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentNotification {
    Follow { follower: UserId, followed: UserId },
    CertificationOutcome { user_id: UserId, status: CertificationStatus },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationSink {
    sent: Arc<Mutex<Vec<SentNotification>>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn record(&self, notification: SentNotification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn send_follow_notification(
        &self,
        follower: &User,
        followed: &User,
    ) -> Result<(), DomainError> {
        tracing::info!(
            follower_id = %follower.id,
            followed_id = %followed.id,
            "Follow notification (not delivered)"
        );
        self.record(SentNotification::Follow {
            follower: follower.id.clone(),
            followed: followed.id.clone(),
        });
        Ok(())
    }

    async fn send_certification_outcome_notification(
        &self,
        user_id: &UserId,
        status: CertificationStatus,
    ) -> Result<(), DomainError> {
        tracing::info!(user_id = %user_id, status = %status, "Certification notification (not delivered)");
        self.record(SentNotification::CertificationOutcome {
            user_id: user_id.clone(),
            status,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingMetricsSink {
    events: Arc<Mutex<Vec<MetricEvent>>>,
}

impl RecordingMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MetricEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MetricsSink for RecordingMetricsSink {
    async fn emit(&self, event: MetricEvent) {
        tracing::debug!(
            metric_type = event.metric_type(),
            sub_type = %event.sub_type(),
            "Metric (not delivered)"
        );
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Keeps the last pin sent to each phone number.
#[derive(Debug, Clone, Default)]
pub struct RecordingMessagingChannel {
    sent: Arc<Mutex<Vec<(String, PinCode)>>>,
}

impl RecordingMessagingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent pin sent to `phone_number`.
    pub fn last_pin_for(&self, phone_number: &str) -> Option<PinCode> {
        self.sent.lock().ok().and_then(|sent| {
            sent.iter()
                .rev()
                .find(|(phone, _)| phone == phone_number)
                .map(|(_, pin)| *pin)
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or_default()
    }
}

#[async_trait]
impl MessagingChannel for RecordingMessagingChannel {
    async fn send_pin(&self, phone_number: &str, pin: &PinCode) -> Result<(), DomainError> {
        tracing::info!(phone_number, "Verification pin (not delivered)");
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((phone_number.to_string(), *pin));
        }
        Ok(())
    }
}
