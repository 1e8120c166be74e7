//! User directory storage port.
//!
//! # Design
//!
//! - **Field-scoped writes**: profile edits never touch the trainer or disabled
//!   flags, and each flag has its own write owned by one workflow
//! - **Soft delete**: deleted profiles disappear from every read but keep
//!   their row, so certifications stay attached and a delete can be undone
//! - **Uniqueness in storage**: duplicate id or nickname surfaces as a Conflict code

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, Pagination, UserId};
use crate::domain::user::{Coordinates, User};

/// Optional filters for directory search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearch {
    /// Case-insensitive prefix of the display name or nickname.
    pub name: Option<String>,
    pub is_verified: Option<bool>,
    pub disabled: Option<bool>,
}

impl UserSearch {
    /// True when the user satisfies every set filter.
    pub fn matches(&self, user: &User) -> bool {
        let name_ok = self.name.as_ref().map_or(true, |prefix| {
            let prefix = prefix.to_lowercase();
            user.display_name.to_lowercase().starts_with(&prefix)
                || user.nickname.to_lowercase().starts_with(&prefix)
        });
        name_ok
            && self.is_verified.map_or(true, |v| v == user.is_verified_trainer)
            && self.disabled.map_or(true, |d| d == user.disabled)
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new profile.
    ///
    /// # Errors
    ///
    /// - `UserAlreadyExists` if a profile with this id exists
    /// - `NicknameTaken` if the nickname is in use
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Writes the self-service profile fields of `user`.
    ///
    /// `is_verified_trainer` and `disabled` are left as stored.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the profile doesn't exist
    /// - `NicknameTaken` if the new nickname is in use
    async fn update_profile(&self, user: &User) -> Result<(), DomainError>;

    /// Sets only the trainer flag.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the profile doesn't exist
    async fn set_verified_trainer(&self, id: &UserId, verified: bool) -> Result<(), DomainError>;

    /// Sets only the disabled flag.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the profile doesn't exist
    async fn set_disabled(&self, id: &UserId, disabled: bool) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError>;

    /// Lists users matching the filters, ordered by nickname.
    async fn search(
        &self,
        filter: &UserSearch,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError>;

    /// Lists users within `radius_km` of `origin`, nearest first, excluding `exclude`.
    async fn find_closest(
        &self,
        exclude: &UserId,
        origin: Coordinates,
        radius_km: f64,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError>;

    /// Soft-deletes a profile. It and its follow edges drop out of every read.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the profile doesn't exist
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;

    /// Undoes `delete`, bringing the profile and its edges back.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if there is no deleted profile with this id
    /// - `NicknameTaken` if the nickname was claimed in the meantime
    async fn restore(&self, id: &UserId) -> Result<(), DomainError>;
}
