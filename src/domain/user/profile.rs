//! User aggregate - a directory profile.
//!
//! # Design Decisions
//!
//! - **Externally issued id**: the identity provider owns `id`; the directory
//!   only stores the profile under it.
//! - **Read-mutate-write**: every flow loads the user, mutates the fields it
//!   owns through a method here, and writes the whole aggregate back.
//! - **Derived trainer flag**: `is_verified_trainer` is only set through
//!   [`User::mark_verified_trainer`], which the certification workflow calls.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

use super::{Coordinates, Interest, UserError};

/// Maximum nickname length accepted by the directory.
pub const MAX_NICKNAME_LEN: usize = 32;

/// User aggregate.
///
/// # Invariants
///
/// - `nickname` is non-empty and globally unique (uniqueness enforced by storage)
/// - `display_name` is non-empty
/// - `coordinates` are within valid latitude/longitude ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub nickname: String,
    pub display_name: String,
    pub is_male: bool,
    pub born_at: Timestamp,
    pub height: u32,
    pub weight: u32,
    pub is_verified_trainer: bool,
    pub disabled: bool,
    pub coordinates: Coordinates,
    pub interests: BTreeSet<Interest>,
    pub created_at: Timestamp,
}

/// Data required to create a directory profile after identity registration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserProfile {
    pub id: UserId,
    pub nickname: String,
    pub display_name: String,
    pub is_male: bool,
    pub born_at: Timestamp,
    pub height: u32,
    pub weight: u32,
    pub coordinates: Coordinates,
    pub interests: BTreeSet<Interest>,
}

/// Partial update of the user-owned profile fields.
///
/// `None` leaves the field untouched. Interests are replaced wholesale when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub nickname: Option<String>,
    pub display_name: Option<String>,
    pub is_male: Option<bool>,
    pub born_at: Option<Timestamp>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub coordinates: Option<Coordinates>,
    pub interests: Option<BTreeSet<Interest>>,
}

/// What changed after applying a [`UserPatch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    pub nickname_changed: bool,
    pub location_changed: bool,
}

/// Profile fields safe to show to any other user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: UserId,
    pub nickname: String,
    pub display_name: String,
    pub is_male: bool,
    pub is_verified_trainer: bool,
    pub picture_url: Option<String>,
}

impl User {
    /// Creates a fresh, enabled, non-trainer profile.
    pub fn register(profile: NewUserProfile) -> Result<Self, ValidationError> {
        validate_nickname(&profile.nickname)?;
        validate_display_name(&profile.display_name)?;

        Ok(Self {
            id: profile.id,
            nickname: profile.nickname.trim().to_string(),
            display_name: profile.display_name.trim().to_string(),
            is_male: profile.is_male,
            born_at: profile.born_at,
            height: profile.height,
            weight: profile.weight,
            is_verified_trainer: false,
            disabled: false,
            coordinates: profile.coordinates,
            interests: profile.interests,
            created_at: Timestamp::now(),
        })
    }

    /// Applies a partial update.
    ///
    /// Nickname uniqueness is not checked here; the caller must have
    /// established it against the directory first.
    pub fn apply_patch(&mut self, patch: UserPatch) -> Result<PatchOutcome, ValidationError> {
        let mut outcome = PatchOutcome::default();

        if let Some(nickname) = patch.nickname {
            validate_nickname(&nickname)?;
            let nickname = nickname.trim().to_string();
            if nickname != self.nickname {
                self.nickname = nickname;
                outcome.nickname_changed = true;
            }
        }
        if let Some(display_name) = patch.display_name {
            validate_display_name(&display_name)?;
            self.display_name = display_name.trim().to_string();
        }
        if let Some(is_male) = patch.is_male {
            self.is_male = is_male;
        }
        if let Some(born_at) = patch.born_at {
            self.born_at = born_at;
        }
        if let Some(height) = patch.height.filter(|h| *h > 0) {
            self.height = height;
        }
        if let Some(weight) = patch.weight.filter(|w| *w > 0) {
            self.weight = weight;
        }
        if let Some(coordinates) = patch.coordinates {
            if coordinates != self.coordinates {
                self.coordinates = coordinates;
                outcome.location_changed = true;
            }
        }
        if let Some(interests) = patch.interests {
            self.interests = interests;
        }

        Ok(outcome)
    }

    /// Flags the user as a verified trainer. Idempotent.
    pub fn mark_verified_trainer(&mut self) {
        self.is_verified_trainer = true;
    }

    /// Blocks the user.
    pub fn disable(&mut self) -> Result<(), UserError> {
        if self.disabled {
            return Err(UserError::already_disabled(self.id.clone()));
        }
        self.disabled = true;
        Ok(())
    }

    /// Unblocks the user.
    pub fn enable(&mut self) -> Result<(), UserError> {
        if !self.disabled {
            return Err(UserError::not_disabled(self.id.clone()));
        }
        self.disabled = false;
        Ok(())
    }

    /// Public projection of the profile with a resolved picture URL.
    pub fn public_profile(&self, picture_url: Option<String>) -> PublicProfile {
        PublicProfile {
            id: self.id.clone(),
            nickname: self.nickname.clone(),
            display_name: self.display_name.clone(),
            is_male: self.is_male,
            is_verified_trainer: self.is_verified_trainer,
            picture_url,
        }
    }
}

fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("nickname"));
    }
    if trimmed.chars().count() > MAX_NICKNAME_LEN {
        return Err(ValidationError::invalid_format(
            "nickname",
            format!("must be at most {} characters", MAX_NICKNAME_LEN),
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::invalid_format(
            "nickname",
            "must not contain whitespace",
        ));
    }
    Ok(())
}

fn validate_display_name(display_name: &str) -> Result<(), ValidationError> {
    if display_name.trim().is_empty() {
        return Err(ValidationError::empty_field("display_name"));
    }
    Ok(())
}
