//! Shared application state for every HTTP route.
//!
//! Holds the Arc-wrapped ports and builds use-case handlers on demand.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::account::{
    AdminLoginHandler, AdminRegisterHandler, FinishRegisterHandler, NotifyLoginHandler,
    NotifyPasswordRecoverHandler, RegisterHandler, SendVerificationPinHandler, VerifyPinHandler,
    DEFAULT_TOKEN_TTL_HOURS,
};
use crate::application::handlers::certification::{
    CreateCertificationHandler, GetCertificationsHandler, ReconcileTrainerFlagHandler,
    UpdateCertificationHandler,
};
use crate::application::handlers::user::{
    DeleteUserHandler, DisableUserHandler, EnableUserHandler, FollowUserHandler,
    GetClosestUsersHandler, GetUserHandler, ListFollowsHandler, SearchUsersHandler,
    UnfollowUserHandler, UpdateUserHandler,
};
use crate::application::DEFAULT_SIDE_EFFECT_TIMEOUT;
use crate::domain::verification::DEFAULT_PIN_TTL_SECS;
use crate::ports::{
    AdminRepository, CertificationRepository, FollowRepository, IdentityProvider,
    MessagingChannel, MetricsSink, NotificationSink, SecretHasher, TokenIssuer, UserRepository,
    VerificationPinRepository,
};

/// Tunables passed into the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerSettings {
    /// Deadline for notifications, metrics and storage URL lookups.
    pub side_effect_timeout: Duration,
    pub pin_ttl_secs: i64,
    pub token_ttl_hours: i64,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            side_effect_timeout: DEFAULT_SIDE_EFFECT_TIMEOUT,
            pin_ttl_secs: DEFAULT_PIN_TTL_SECS,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub certifications: Arc<dyn CertificationRepository>,
    pub pins: Arc<dyn VerificationPinRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub notifications: Arc<dyn NotificationSink>,
    pub metrics: Arc<dyn MetricsSink>,
    pub messaging: Arc<dyn MessagingChannel>,
    pub hasher: Arc<dyn SecretHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub settings: HandlerSettings,
}

impl AppState {
    // Accounts

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.identity.clone(), self.metrics.clone())
            .with_side_effect_timeout(self.settings.side_effect_timeout)
    }

    pub fn finish_register_handler(&self) -> FinishRegisterHandler {
        FinishRegisterHandler::new(self.users.clone())
    }

    pub fn send_verification_pin_handler(&self) -> SendVerificationPinHandler {
        SendVerificationPinHandler::new(
            self.identity.clone(),
            self.pins.clone(),
            self.hasher.clone(),
            self.messaging.clone(),
        )
        .with_pin_ttl_secs(self.settings.pin_ttl_secs)
    }

    pub fn verify_pin_handler(&self) -> VerifyPinHandler {
        VerifyPinHandler::new(self.identity.clone(), self.pins.clone(), self.hasher.clone())
    }

    pub fn notify_login_handler(&self) -> NotifyLoginHandler {
        NotifyLoginHandler::new(self.metrics.clone())
            .with_side_effect_timeout(self.settings.side_effect_timeout)
    }

    pub fn notify_password_recover_handler(&self) -> NotifyPasswordRecoverHandler {
        NotifyPasswordRecoverHandler::new(self.metrics.clone())
            .with_side_effect_timeout(self.settings.side_effect_timeout)
    }

    pub fn admin_register_handler(&self) -> AdminRegisterHandler {
        AdminRegisterHandler::new(self.admins.clone(), self.hasher.clone())
    }

    pub fn admin_login_handler(&self) -> AdminLoginHandler {
        AdminLoginHandler::new(self.admins.clone(), self.hasher.clone(), self.tokens.clone())
            .with_token_ttl_hours(self.settings.token_ttl_hours)
    }

    // Users

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.users.clone(), self.identity.clone())
            .with_lookup_timeout(self.settings.side_effect_timeout)
    }

    pub fn search_users_handler(&self) -> SearchUsersHandler {
        SearchUsersHandler::new(self.users.clone(), self.identity.clone())
            .with_lookup_timeout(self.settings.side_effect_timeout)
    }

    pub fn closest_users_handler(&self) -> GetClosestUsersHandler {
        GetClosestUsersHandler::new(self.users.clone(), self.identity.clone())
            .with_lookup_timeout(self.settings.side_effect_timeout)
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.users.clone(), self.metrics.clone())
            .with_side_effect_timeout(self.settings.side_effect_timeout)
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.users.clone(), self.identity.clone())
    }

    pub fn disable_user_handler(&self) -> DisableUserHandler {
        DisableUserHandler::new(self.users.clone(), self.identity.clone(), self.metrics.clone())
            .with_side_effect_timeout(self.settings.side_effect_timeout)
    }

    pub fn enable_user_handler(&self) -> EnableUserHandler {
        EnableUserHandler::new(self.users.clone(), self.identity.clone())
    }

    pub fn follow_user_handler(&self) -> FollowUserHandler {
        FollowUserHandler::new(
            self.users.clone(),
            self.follows.clone(),
            self.notifications.clone(),
            self.metrics.clone(),
        )
        .with_side_effect_timeout(self.settings.side_effect_timeout)
    }

    pub fn unfollow_user_handler(&self) -> UnfollowUserHandler {
        UnfollowUserHandler::new(self.users.clone(), self.follows.clone())
    }

    pub fn list_follows_handler(&self) -> ListFollowsHandler {
        ListFollowsHandler::new(self.users.clone(), self.follows.clone(), self.identity.clone())
            .with_lookup_timeout(self.settings.side_effect_timeout)
    }

    // Certifications

    pub fn create_certification_handler(&self) -> CreateCertificationHandler {
        CreateCertificationHandler::new(self.users.clone(), self.certifications.clone())
    }

    pub fn get_certifications_handler(&self) -> GetCertificationsHandler {
        GetCertificationsHandler::new(
            self.users.clone(),
            self.certifications.clone(),
            self.identity.clone(),
        )
        .with_lookup_timeout(self.settings.side_effect_timeout)
    }

    pub fn update_certification_handler(&self) -> UpdateCertificationHandler {
        UpdateCertificationHandler::new(
            self.users.clone(),
            self.certifications.clone(),
            self.identity.clone(),
            self.notifications.clone(),
            self.metrics.clone(),
        )
        .with_side_effect_timeout(self.settings.side_effect_timeout)
    }

    pub fn reconcile_trainer_flag_handler(&self) -> ReconcileTrainerFlagHandler {
        ReconcileTrainerFlagHandler::new(self.users.clone(), self.certifications.clone())
    }
}
