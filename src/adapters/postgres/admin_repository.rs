//! PostgreSQL implementation of AdminRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{database_error, violated_constraint};
use crate::domain::admin::Administrator;
use crate::domain::foundation::{AdminId, DomainError, ErrorCode, Timestamp};
use crate::ports::AdminRepository;

pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for Administrator {
    fn from(row: AdminRow) -> Self {
        Administrator {
            id: AdminId::from_uuid(row.id),
            email: row.email,
            password_hash: row.password_hash,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn create(&self, admin: &Administrator) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO administrators (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(admin.id.as_uuid())
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violated_constraint(&e) == Some("administrators_email_key") {
                return DomainError::new(ErrorCode::AdminAlreadyExists, "Administrator already exists")
                    .with_detail("email", admin.email.as_str());
            }
            database_error("create administrator", e)
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Administrator>, DomainError> {
        let row: Option<AdminRow> = sqlx::query_as(
            "SELECT id, email, password_hash, created_at FROM administrators WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find administrator", e))?;

        Ok(row.map(Administrator::from))
    }
}
