//! Certification module - trainer certification workflow.
//!
//! A user asks to be certified as a trainer by opening a request. A
//! privileged reviewer then approves or denies it. Approval flips the
//! owner's `is_verified_trainer` flag and can never be reversed.
//!
//! # Domain Invariants
//!
//! 1. At most one pending certification per user
//! 2. Approved is terminal; re-approval is a no-op
//! 3. Denied requests do not block new ones
//! 4. Certifications are never deleted

mod aggregate;
mod errors;
mod status;

pub use aggregate::{Certification, CertificationFilter, StatusChange};
pub use errors::CertificationError;
pub use status::CertificationStatus;
