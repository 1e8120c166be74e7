//! In-memory user directory and follow graph.
//!
//! Both ports share one store so follower listings can join edges to
//! profiles the way the SQL adapter does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::follow::FollowEdge;
use crate::domain::foundation::{DomainError, ErrorCode, Page, Pagination, UserId};
use crate::domain::user::{Coordinates, User};
use crate::ports::{FollowRepository, UserRepository, UserSearch};

#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<UserId, User>,
    /// Soft-deleted profiles, kept so a delete can be undone.
    deleted: HashMap<UserId, User>,
    /// Edges touching a deleted user stay stored but are never listed.
    edges: Vec<FollowEdge>,
}

/// In-memory `UserRepository` + `FollowRepository`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored follow edges.
    pub async fn edge_count(&self) -> usize {
        self.state.read().await.edges.len()
    }

    fn nickname_taken(state: &DirectoryState, user: &User) -> bool {
        state
            .users
            .values()
            .any(|u| u.id != user.id && u.nickname.eq_ignore_ascii_case(&user.nickname))
    }

    fn nickname_conflict(nickname: &str) -> DomainError {
        DomainError::new(ErrorCode::NicknameTaken, "Nickname already in use")
            .with_detail("nickname", nickname)
    }

    fn not_found(id: &UserId) -> DomainError {
        DomainError::new(ErrorCode::UserNotFound, "User not found").with_detail("user_id", id.as_str())
    }

    fn users_for(state: &DirectoryState, ids: Vec<&UserId>) -> Vec<User> {
        ids.into_iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryDirectory {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.users.contains_key(&user.id) || state.deleted.contains_key(&user.id) {
            return Err(
                DomainError::new(ErrorCode::UserAlreadyExists, "User already exists")
                    .with_detail("user_id", user.id.as_str()),
            );
        }
        if Self::nickname_taken(&state, user) {
            return Err(Self::nickname_conflict(&user.nickname));
        }
        state.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if Self::nickname_taken(&state, user) {
            return Err(Self::nickname_conflict(&user.nickname));
        }
        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or_else(|| Self::not_found(&user.id))?;

        let is_verified_trainer = stored.is_verified_trainer;
        let disabled = stored.disabled;
        *stored = User {
            is_verified_trainer,
            disabled,
            ..user.clone()
        };
        Ok(())
    }

    async fn set_verified_trainer(&self, id: &UserId, verified: bool) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state.users.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        stored.is_verified_trainer = verified;
        Ok(())
    }

    async fn set_disabled(&self, id: &UserId, disabled: bool) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state.users.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        stored.disabled = disabled;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.nickname.eq_ignore_ascii_case(nickname))
            .cloned())
    }

    async fn search(
        &self,
        filter: &UserSearch,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        let state = self.state.read().await;
        let mut matching: Vec<User> = state
            .users
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.nickname.cmp(&b.nickname));

        let total = matching.len() as u64;
        Ok(Page::new(pagination.slice(&matching), pagination, total))
    }

    async fn find_closest(
        &self,
        exclude: &UserId,
        origin: Coordinates,
        radius_km: f64,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        let state = self.state.read().await;
        let mut nearby: Vec<(f64, User)> = state
            .users
            .values()
            .filter(|u| &u.id != exclude)
            .map(|u| (origin.distance_km(&u.coordinates), u.clone()))
            .filter(|(distance, _)| *distance <= radius_km)
            .collect();
        nearby.sort_by(|a, b| a.0.total_cmp(&b.0));

        let users: Vec<User> = nearby.into_iter().map(|(_, u)| u).collect();
        let total = users.len() as u64;
        Ok(Page::new(pagination.slice(&users), pagination, total))
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let user = state.users.remove(id).ok_or_else(|| Self::not_found(id))?;
        state.deleted.insert(id.clone(), user);
        Ok(())
    }

    async fn restore(&self, id: &UserId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let user = state.deleted.get(id).cloned().ok_or_else(|| Self::not_found(id))?;
        if Self::nickname_taken(&state, &user) {
            return Err(Self::nickname_conflict(&user.nickname));
        }
        state.deleted.remove(id);
        state.users.insert(id.clone(), user);
        Ok(())
    }
}

#[async_trait]
impl FollowRepository for InMemoryDirectory {
    async fn add(&self, edge: &FollowEdge) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        if state.edges.iter().any(|e| e.same_pair(edge)) {
            return Ok(false);
        }
        state.edges.push(edge.clone());
        Ok(true)
    }

    async fn remove(&self, follower_id: &UserId, followed_id: &UserId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let before = state.edges.len();
        state
            .edges
            .retain(|e| !(&e.follower_id == follower_id && &e.followed_id == followed_id));
        Ok(state.edges.len() != before)
    }

    async fn followers(
        &self,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        let state = self.state.read().await;
        let ids: Vec<&UserId> = state
            .edges
            .iter()
            .rev()
            .filter(|e| &e.followed_id == user_id)
            .map(|e| &e.follower_id)
            .collect();
        let users = Self::users_for(&state, ids);
        let total = users.len() as u64;
        Ok(Page::new(pagination.slice(&users), pagination, total))
    }

    async fn followed(
        &self,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        let state = self.state.read().await;
        let ids: Vec<&UserId> = state
            .edges
            .iter()
            .rev()
            .filter(|e| &e.follower_id == user_id)
            .map(|e| &e.followed_id)
            .collect();
        let users = Self::users_for(&state, ids);
        let total = users.len() as u64;
        Ok(Page::new(pagination.slice(&users), pagination, total))
    }
}
