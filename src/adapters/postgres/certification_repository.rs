//! PostgreSQL implementation of CertificationRepository.
//!
//! The partial unique index `certifications_one_pending_per_user` is the
//! last line of defence for the one-pending-request rule when two creates race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{count_to_u64, database_error, page_bounds, violated_constraint};
use crate::domain::certification::{Certification, CertificationFilter, CertificationStatus};
use crate::domain::foundation::{
    CertificationId, DomainError, ErrorCode, Page, Pagination, Timestamp, UserId,
};
use crate::ports::CertificationRepository;

const PENDING_INDEX: &str = "certifications_one_pending_per_user";

pub struct PostgresCertificationRepository {
    pool: PgPool,
}

impl PostgresCertificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CertificationRow {
    id: Uuid,
    user_id: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CertificationRow> for Certification {
    type Error = DomainError;

    fn try_from(row: CertificationRow) -> Result<Self, Self::Error> {
        Ok(Certification {
            id: CertificationId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            status: row.status.parse::<CertificationStatus>().map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid status: {}", e))
            })?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn write_error(action: &str, certification: &Certification, e: sqlx::Error) -> DomainError {
    if violated_constraint(&e) == Some(PENDING_INDEX) {
        return DomainError::new(
            ErrorCode::PendingCertificationExists,
            "User already has a pending certification",
        )
        .with_detail("user_id", certification.user_id.as_str());
    }
    database_error(action, e)
}

#[async_trait]
impl CertificationRepository for PostgresCertificationRepository {
    async fn create(&self, certification: &Certification) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO certifications (id, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(certification.id.as_uuid())
        .bind(certification.user_id.as_str())
        .bind(certification.status.as_str())
        .bind(certification.created_at.as_datetime())
        .bind(certification.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("create certification", certification, e))?;

        Ok(())
    }

    async fn update(&self, certification: &Certification) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE certifications SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(certification.id.as_uuid())
        .bind(certification.status.as_str())
        .bind(certification.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update certification", certification, e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CertificationNotFound,
                "Certification not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CertificationId,
    ) -> Result<Option<Certification>, DomainError> {
        let row: Option<CertificationRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, status, created_at, updated_at
            FROM certifications WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("find certification", e))?;

        row.map(Certification::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &CertificationFilter,
        pagination: Pagination,
    ) -> Result<Page<Certification>, DomainError> {
        let user_id = filter.user_id.as_ref().map(|id| id.as_str().to_string());
        let status = filter.status.map(|s| s.as_str());
        let (limit, offset) = page_bounds(pagination);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM certifications
            WHERE ($1::text IS NULL OR user_id = $1)
              AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(&user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("count certifications", e))?;

        let rows: Vec<CertificationRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, status, created_at, updated_at
            FROM certifications
            WHERE ($1::text IS NULL OR user_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("list certifications", e))?;

        let items = rows
            .into_iter()
            .map(Certification::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, pagination, count_to_u64(total)))
    }

    async fn exists_with_status(
        &self,
        user_id: &UserId,
        status: CertificationStatus,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM certifications WHERE user_id = $1 AND status = $2)",
        )
        .bind(user_id.as_str())
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| database_error("check certification status", e))
    }
}
