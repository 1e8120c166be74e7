//! PostgreSQL implementation of UserRepository and FollowRepository.
//!
//! Interests are a `TEXT[]` column; follow edges live in `follows` with a
//! composite primary key, so a repeat follow is absorbed by `ON CONFLICT`.
//!
//! Users are soft-deleted through `deleted_at`. Every read filters on
//! `deleted_at IS NULL`, and each write touches only the columns it owns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{count_to_u64, database_error, page_bounds, violated_constraint};
use crate::domain::follow::FollowEdge;
use crate::domain::foundation::{DomainError, ErrorCode, Page, Pagination, Timestamp, UserId};
use crate::domain::user::{Coordinates, Interest, User, EARTH_RADIUS_KM};
use crate::ports::{FollowRepository, UserRepository, UserSearch};

const USER_COLUMNS: &str = "u.id, u.nickname, u.display_name, u.is_male, u.born_at, u.height, \
     u.weight, u.is_verified_trainer, u.disabled, u.latitude, u.longitude, u.interests, u.created_at";

const ACTIVE: &str = "u.deleted_at IS NULL";

/// Great-circle distance from ($1, $2) to the row, in kilometres, for earth radius $3.
const DISTANCE_SQL: &str = "$3 * acos(LEAST(1.0, GREATEST(-1.0, \
     cos(radians($1)) * cos(radians(u.latitude)) * cos(radians(u.longitude) - radians($2)) \
     + sin(radians($1)) * sin(radians(u.latitude)))))";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    nickname: String,
    display_name: String,
    is_male: bool,
    born_at: DateTime<Utc>,
    height: i32,
    weight: i32,
    is_verified_trainer: bool,
    disabled: bool,
    latitude: f64,
    longitude: f64,
    interests: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, e: String| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid {}: {}", what, e))
        };

        Ok(User {
            id: UserId::new(row.id).map_err(|e| corrupt("user id", e.to_string()))?,
            nickname: row.nickname,
            display_name: row.display_name,
            is_male: row.is_male,
            born_at: Timestamp::from_datetime(row.born_at),
            height: u32::try_from(row.height).map_err(|e| corrupt("height", e.to_string()))?,
            weight: u32::try_from(row.weight).map_err(|e| corrupt("weight", e.to_string()))?,
            is_verified_trainer: row.is_verified_trainer,
            disabled: row.disabled,
            coordinates: Coordinates::new(row.latitude, row.longitude)
                .map_err(|e| corrupt("coordinates", e.to_string()))?,
            interests: Interest::parse_all(&row.interests)
                .map_err(|e| corrupt("interests", e.to_string()))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn interests_column(user: &User) -> Vec<String> {
    user.interests.iter().map(|i| i.as_str().to_string()).collect()
}

/// Escapes LIKE wildcards so user input only ever matches as a prefix.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn write_error(action: &str, user: &User, e: sqlx::Error) -> DomainError {
    match violated_constraint(&e) {
        Some("users_pkey") => DomainError::new(ErrorCode::UserAlreadyExists, "User already exists")
            .with_detail("user_id", user.id.as_str()),
        Some("users_nickname_lower_key") => {
            DomainError::new(ErrorCode::NicknameTaken, "Nickname already taken")
                .with_detail("nickname", user.nickname.as_str())
        }
        _ => database_error(action, e),
    }
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, "User not found").with_detail("user_id", id.as_str())
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, DomainError> {
    rows.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, nickname, display_name, is_male, born_at, height, weight,
                is_verified_trainer, disabled, latitude, longitude, interests, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.nickname)
        .bind(&user.display_name)
        .bind(user.is_male)
        .bind(user.born_at.as_datetime())
        .bind(user.height as i32)
        .bind(user.weight as i32)
        .bind(user.is_verified_trainer)
        .bind(user.disabled)
        .bind(user.coordinates.latitude())
        .bind(user.coordinates.longitude())
        .bind(interests_column(user))
        .bind(user.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("create user", user, e))?;

        Ok(())
    }

    async fn update_profile(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                nickname = $2,
                display_name = $3,
                is_male = $4,
                born_at = $5,
                height = $6,
                weight = $7,
                latitude = $8,
                longitude = $9,
                interests = $10
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.nickname)
        .bind(&user.display_name)
        .bind(user.is_male)
        .bind(user.born_at.as_datetime())
        .bind(user.height as i32)
        .bind(user.weight as i32)
        .bind(user.coordinates.latitude())
        .bind(user.coordinates.longitude())
        .bind(interests_column(user))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update user profile", user, e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&user.id));
        }
        Ok(())
    }

    async fn set_verified_trainer(&self, id: &UserId, verified: bool) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET is_verified_trainer = $2 WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id.as_str())
        .bind(verified)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("set trainer flag", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn set_disabled(&self, id: &UserId, disabled: bool) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE users SET disabled = $2 WHERE id = $1 AND deleted_at IS NULL")
                .bind(id.as_str())
                .bind(disabled)
                .execute(&self.pool)
                .await
                .map_err(|e| database_error("set disabled flag", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users u WHERE u.id = $1 AND {}",
            USER_COLUMNS, ACTIVE
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users u WHERE lower(u.nickname) = lower($1) AND {}",
            USER_COLUMNS, ACTIVE
        ))
        .bind(nickname)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find user by nickname", e))?;

        row.map(User::try_from).transpose()
    }

    async fn search(
        &self,
        filter: &UserSearch,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        const WHERE: &str = "u.deleted_at IS NULL \
             AND ($1::text IS NULL \
                OR lower(u.nickname) LIKE $1 \
                OR lower(u.display_name) LIKE $1) \
             AND ($2::boolean IS NULL OR u.is_verified_trainer = $2) \
             AND ($3::boolean IS NULL OR u.disabled = $3)";

        let pattern = filter.name.as_deref().map(like_prefix);
        let (limit, offset) = page_bounds(pagination);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users u WHERE {}", WHERE))
            .bind(&pattern)
            .bind(filter.is_verified)
            .bind(filter.disabled)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("count users", e))?;

        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users u WHERE {} ORDER BY u.nickname LIMIT $4 OFFSET $5",
            USER_COLUMNS, WHERE
        ))
        .bind(&pattern)
        .bind(filter.is_verified)
        .bind(filter.disabled)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("search users", e))?;

        Ok(Page::new(rows_to_users(rows)?, pagination, count_to_u64(total)))
    }

    async fn find_closest(
        &self,
        exclude: &UserId,
        origin: Coordinates,
        radius_km: f64,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        let (limit, offset) = page_bounds(pagination);

        // $1 latitude, $2 longitude, $3 earth radius, $4 excluded id, $5 radius
        let nearby = format!(
            "SELECT {}, {} AS distance_km FROM users u WHERE u.id <> $4 AND {}",
            USER_COLUMNS, DISTANCE_SQL, ACTIVE
        );

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM ({}) n WHERE n.distance_km <= $5",
            nearby
        ))
        .bind(origin.latitude())
        .bind(origin.longitude())
        .bind(EARTH_RADIUS_KM)
        .bind(exclude.as_str())
        .bind(radius_km)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("count closest users", e))?;

        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT * FROM ({}) n WHERE n.distance_km <= $5 ORDER BY n.distance_km LIMIT $6 OFFSET $7",
            nearby
        ))
        .bind(origin.latitude())
        .bind(origin.longitude())
        .bind(EARTH_RADIUS_KM)
        .bind(exclude.as_str())
        .bind(radius_km)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("find closest users", e))?;

        Ok(Page::new(rows_to_users(rows)?, pagination, count_to_u64(total)))
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| database_error("delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn restore(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NULL WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("users_nickname_lower_key") => {
                DomainError::new(ErrorCode::NicknameTaken, "Nickname already taken")
                    .with_detail("user_id", id.as_str())
            }
            _ => database_error("restore user", e),
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

impl PostgresUserRepository {
    async fn list_edges(
        &self,
        join_on: &str,
        filter_on: &str,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        let (limit, offset) = page_bounds(pagination);

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM follows f JOIN users u ON u.id = f.{} \
             WHERE f.{} = $1 AND {}",
            join_on, filter_on, ACTIVE
        ))
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("count follows", e))?;

        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM follows f JOIN users u ON u.id = f.{} \
             WHERE f.{} = $1 AND {} ORDER BY f.created_at DESC LIMIT $2 OFFSET $3",
            USER_COLUMNS, join_on, filter_on, ACTIVE
        ))
        .bind(user_id.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list follows", e))?;

        Ok(Page::new(rows_to_users(rows)?, pagination, count_to_u64(total)))
    }
}

#[async_trait]
impl FollowRepository for PostgresUserRepository {
    async fn add(&self, edge: &FollowEdge) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followed_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            "#,
        )
        .bind(edge.follower_id.as_str())
        .bind(edge.followed_id.as_str())
        .bind(edge.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("add follow", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove(&self, follower_id: &UserId, followed_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
            .bind(follower_id.as_str())
            .bind(followed_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("remove follow", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn followers(
        &self,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        self.list_edges("follower_id", "followed_id", user_id, pagination)
            .await
    }

    async fn followed(
        &self,
        user_id: &UserId,
        pagination: Pagination,
    ) -> Result<Page<User>, DomainError> {
        self.list_edges("followed_id", "follower_id", user_id, pagination)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_prefix_escapes_wildcards() {
        assert_eq!(like_prefix("Run"), "run%");
        assert_eq!(like_prefix("50%_off"), "50\\%\\_off%");
    }
}
