//! Verification module - phone possession check via short-lived pins.
//!
//! # Domain Invariants
//!
//! 1. Pins are stored hashed, never in plaintext
//! 2. One live pin per user; issuing a new one replaces the old
//! 3. The hash is checked before the expiry
//! 4. A pin is consumed by a successful verification

mod errors;
mod pin;

pub use errors::VerificationError;
pub use pin::{PinCode, VerificationPin, DEFAULT_PIN_TTL_SECS, MAX_PIN};
