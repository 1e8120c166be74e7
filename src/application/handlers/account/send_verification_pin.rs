//! SendVerificationPinHandler - issues a phone verification pin.
//!
//! Only the hash is stored. Delivery failure fails the request, since the
//! user cannot continue without the pin.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::verification::{
    PinCode, VerificationError, VerificationPin, DEFAULT_PIN_TTL_SECS,
};
use crate::ports::{IdentityProvider, MessagingChannel, SecretHasher, VerificationPinRepository};

#[derive(Debug, Clone)]
pub struct SendVerificationPinCommand {
    pub user_id: UserId,
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct SendVerificationPinResult {
    /// Stored record. Carries the hash, never the plaintext.
    pub pin: VerificationPin,
}

pub struct SendVerificationPinHandler {
    identity: Arc<dyn IdentityProvider>,
    pins: Arc<dyn VerificationPinRepository>,
    hasher: Arc<dyn SecretHasher>,
    messaging: Arc<dyn MessagingChannel>,
    pin_ttl_secs: i64,
}

impl SendVerificationPinHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        pins: Arc<dyn VerificationPinRepository>,
        hasher: Arc<dyn SecretHasher>,
        messaging: Arc<dyn MessagingChannel>,
    ) -> Self {
        Self {
            identity,
            pins,
            hasher,
            messaging,
            pin_ttl_secs: DEFAULT_PIN_TTL_SECS,
        }
    }

    pub fn with_pin_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.pin_ttl_secs = ttl_secs;
        self
    }

    pub async fn handle(
        &self,
        cmd: SendVerificationPinCommand,
    ) -> Result<SendVerificationPinResult, VerificationError> {
        let phone_number = cmd.phone_number.trim();
        if phone_number.is_empty() {
            return Err(VerificationError::validation("phone_number", "must not be empty"));
        }

        // 1. Nothing to do for verified accounts
        if self.identity.user_is_verified(&cmd.user_id).await? {
            return Err(VerificationError::already_verified(cmd.user_id));
        }

        // 2. Generate and hash
        let code = PinCode::generate();
        let pin_hash = self.hasher.hash(&code.to_string())?;
        let pin = VerificationPin::issue(cmd.user_id, pin_hash, Timestamp::now(), self.pin_ttl_secs);

        // 3. Replace any earlier pin
        self.pins.upsert(&pin).await?;

        // 4. Deliver
        if let Err(err) = self.messaging.send_pin(phone_number, &code).await {
            tracing::error!(user_id = %pin.user_id, error = %err, "Failed to deliver verification pin");
            return Err(err.into());
        }

        tracing::info!(user_id = %pin.user_id, expires_at = %pin.expires_at, "Verification pin sent");

        Ok(SendVerificationPinResult { pin })
    }
}
