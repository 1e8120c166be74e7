//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `UserRepository` - User directory profiles
//! - `FollowRepository` - Follow graph edges
//! - `CertificationRepository` - Trainer certification requests
//! - `VerificationPinRepository` - Hashed phone verification pins
//! - `AdminRepository` - Administrator accounts
//!
//! ## Collaborator Ports
//!
//! - `IdentityProvider` - Logins, verified flag, storage URLs
//! - `NotificationSink` - Best-effort push notifications
//! - `MetricsSink` - Fire-and-forget business metrics
//! - `MessagingChannel` - Pin delivery over WhatsApp/SMS
//! - `SecretHasher` - Slow hashing for passwords and pins
//! - `TokenIssuer` - Admin session tokens

mod admin_repository;
mod certification_repository;
mod follow_repository;
mod identity_provider;
mod messaging_channel;
mod metrics_sink;
mod notification_sink;
mod secret_hasher;
mod token_issuer;
mod user_repository;
mod verification_pin_repository;

pub use admin_repository::AdminRepository;
pub use certification_repository::CertificationRepository;
pub use follow_repository::FollowRepository;
pub use identity_provider::IdentityProvider;
pub use messaging_channel::MessagingChannel;
pub use metrics_sink::MetricsSink;
pub use notification_sink::NotificationSink;
pub use secret_hasher::SecretHasher;
pub use token_issuer::TokenIssuer;
pub use user_repository::{UserRepository, UserSearch};
pub use verification_pin_repository::VerificationPinRepository;
