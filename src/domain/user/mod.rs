//! User module - the user directory.
//!
//! A `User` is a fitness-app profile keyed by the id the identity provider
//! issued at registration. The directory owns nickname, body metrics,
//! location and interests; the certification workflow owns the
//! `is_verified_trainer` flag.
//!
//! # Domain Invariants
//!
//! 1. Nicknames are globally unique
//! 2. Latitude and longitude are always set together
//! 3. Interests come from a closed set of tags
//! 4. Only an approved certification sets `is_verified_trainer`

mod errors;
mod interests;
mod location;
mod profile;

pub use errors::UserError;
pub use interests::Interest;
pub use location::{Coordinates, EARTH_RADIUS_KM};
pub use profile::{NewUserProfile, PatchOutcome, PublicProfile, User, UserPatch, MAX_NICKNAME_LEN};

#[cfg(test)]
pub(crate) use profile::test_support;
