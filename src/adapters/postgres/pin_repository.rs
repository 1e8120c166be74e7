//! PostgreSQL implementation of VerificationPinRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::database_error;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::verification::VerificationPin;
use crate::ports::VerificationPinRepository;

pub struct PostgresVerificationPinRepository {
    pool: PgPool,
}

impl PostgresVerificationPinRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PinRow {
    user_id: String,
    pin_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PinRow> for VerificationPin {
    type Error = DomainError;

    fn try_from(row: PinRow) -> Result<Self, Self::Error> {
        Ok(VerificationPin {
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            pin_hash: row.pin_hash,
            expires_at: Timestamp::from_datetime(row.expires_at),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl VerificationPinRepository for PostgresVerificationPinRepository {
    async fn upsert(&self, pin: &VerificationPin) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO verification_pins (user_id, pin_hash, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                pin_hash = EXCLUDED.pin_hash,
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(pin.user_id.as_str())
        .bind(&pin.pin_hash)
        .bind(pin.expires_at.as_datetime())
        .bind(pin.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("store verification pin", e))?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<VerificationPin>, DomainError> {
        let row: Option<PinRow> = sqlx::query_as(
            "SELECT user_id, pin_hash, expires_at, created_at FROM verification_pins WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find verification pin", e))?;

        row.map(VerificationPin::try_from).transpose()
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM verification_pins WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("delete verification pin", e))?;

        Ok(())
    }
}
