//! Phone messaging port used to deliver verification pins.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::verification::PinCode;

/// Delivery is load-bearing: failures propagate to the caller.
#[async_trait]
pub trait MessagingChannel: Send + Sync {
    async fn send_pin(&self, phone_number: &str, pin: &PinCode) -> Result<(), DomainError>;
}
