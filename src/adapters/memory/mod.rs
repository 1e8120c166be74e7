//! In-memory adapters.
//!
//! Thread-safe implementations of every storage and collaborator port.
//! Used by tests and by the binary when no database or remote service is
//! configured.

mod admin_store;
mod certification_store;
mod directory;
mod identity;
mod pin_store;
mod recorders;

pub use admin_store::InMemoryAdminStore;
pub use certification_store::InMemoryCertificationStore;
pub use directory::InMemoryDirectory;
pub use identity::InMemoryIdentityProvider;
pub use pin_store::InMemoryVerificationPinStore;
pub use recorders::{
    RecordingMessagingChannel, RecordingMetricsSink, RecordingNotificationSink, SentNotification,
};
